//! Headless platform
//!
//! No window, no terminal: input comes from a script keyed by poll number,
//! frames are counted and the last one is kept for inspection. Ticks run as
//! fast as the caller drives them.

use std::collections::BTreeMap;

use super::{Platform, PlatformEvent};
use crate::assets::{AssetManifest, ImageInfo};
use crate::error::{Error, Result};
use crate::render::Frame;

pub struct HeadlessPlatform {
    manifest: AssetManifest,
    script: BTreeMap<u64, Vec<PlatformEvent>>,
    polls: u64,
    frames_presented: u64,
    last_frame: Option<Frame>,
}

impl HeadlessPlatform {
    pub fn new(manifest: AssetManifest) -> Self {
        Self {
            manifest,
            script: BTreeMap::new(),
            polls: 0,
            frames_presented: 0,
            last_frame: None,
        }
    }

    /// Queue an event for the given poll (0 = first tick)
    pub fn with_event(mut self, poll: u64, event: PlatformEvent) -> Self {
        self.script.entry(poll).or_default().push(event);
        self
    }

    pub fn frames_presented(&self) -> u64 {
        self.frames_presented
    }

    pub fn last_frame(&self) -> Option<&Frame> {
        self.last_frame.as_ref()
    }
}

impl Default for HeadlessPlatform {
    fn default() -> Self {
        Self::new(AssetManifest::default())
    }
}

impl Platform for HeadlessPlatform {
    fn load_image(&mut self, name: &str) -> Result<ImageInfo> {
        self.manifest.get(name).ok_or_else(|| Error::Asset {
            name: name.to_string(),
        })
    }

    fn poll_events(&mut self) -> Result<Vec<PlatformEvent>> {
        let events = self.script.remove(&self.polls).unwrap_or_default();
        self.polls += 1;
        Ok(events)
    }

    fn present(&mut self, frame: &Frame) -> Result<()> {
        self.frames_presented += 1;
        self.last_frame = Some(frame.clone());
        Ok(())
    }

    fn wait_for_next_tick(&mut self) {}
}
