//! Frame building
//!
//! Turns world state into a flat list of draw commands in world pixels.
//! Platforms decide how to put them on screen.

use crate::assets::SpriteId;
use crate::consts::*;
use crate::sim::{Rect, World};

pub type Color = (u8, u8, u8);

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear(Color),
    FillRect {
        rect: Rect,
        color: Color,
    },
    Sprite {
        id: SpriteId,
        /// Destination rectangle (sprite is scaled to fit)
        rect: Rect,
        /// Flip horizontally
        mirrored: bool,
    },
    /// Fixed-width text with its top-left corner at `x`, `y`
    Text {
        x: i32,
        y: i32,
        text: String,
        color: Color,
    },
}

/// One frame, in painter's order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frame {
    pub commands: Vec<DrawCommand>,
}

impl Frame {
    pub fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    pub fn sprites(&self) -> impl Iterator<Item = (SpriteId, &Rect, bool)> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Sprite { id, rect, mirrored } => Some((*id, rect, *mirrored)),
            _ => None,
        })
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

/// Score padded to five digits, and the x it is drawn at. Scores past five
/// digits shift left to make room.
pub fn score_label(score: u64) -> (i32, String) {
    let x = if score > 99_999 {
        SCORE_X - SCORE_WIDE_SHIFT
    } else {
        SCORE_X
    };
    (x, format!("{:0width$}", score, width = SCORE_DIGITS))
}

pub fn build_frame(world: &World) -> Frame {
    let mut frame = Frame::default();

    frame.push(DrawCommand::Clear(BACKGROUND_COLOR));
    frame.push(DrawCommand::FillRect {
        rect: Rect::new(0, FLOOR_Y, WORLD_WIDTH, FLOOR_THICKNESS),
        color: ASSET_COLOR,
    });

    let (x, text) = score_label(world.score());
    frame.push(DrawCommand::Text {
        x,
        y: 0,
        text,
        color: ASSET_COLOR,
    });

    for obstacle in &world.obstacles {
        frame.push(DrawCommand::Sprite {
            id: obstacle.sprite,
            rect: obstacle.bounds(),
            mirrored: obstacle.mirrored,
        });
    }

    for particle in &world.dust.particles {
        frame.push(DrawCommand::FillRect {
            rect: *particle,
            color: ASSET_COLOR,
        });
    }

    frame.push(DrawCommand::Sprite {
        id: SpriteId::Character,
        rect: world.character.bounds(),
        mirrored: false,
    });

    frame
}
