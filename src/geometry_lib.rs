use crate::OUTPUT_EXTENSION;

/// One of the four crops of the invitation layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Part {
    LeftDoor,
    RightDoor,
    LeftBottomText,
    RightBottomText,
}

impl Part {
    /// Write order of the four crops.
    pub const ALL: [Part; 4] = [
        Part::LeftDoor,
        Part::RightDoor,
        Part::LeftBottomText,
        Part::RightBottomText,
    ];

    pub fn file_stem(&self) -> &'static str {
        match self {
            Part::LeftDoor => "left_door",
            Part::RightDoor => "right_door",
            Part::LeftBottomText => "left_bottom_text",
            Part::RightBottomText => "right_bottom_text",
        }
    }

    pub fn file_name(&self) -> String {
        format!("{}.{}", self.file_stem(), OUTPUT_EXTENSION)
    }
}

/// Axis-aligned rectangle in pixel coordinates, right and bottom exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Region {
    pub fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Cut lines for one image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitGeometry {
    pub width: u32,
    pub height: u32,
    pub mid_x: u32,
    pub text_height: u32,
    pub door_height: u32,
}

/// Computes where to cut an image of `width` x `height`.
///
/// The text height is floored in `f64`, so 600 * 0.3 gives 180 rather
/// than 179. Zero dimensions produce zero-area regions instead of an error.
pub fn compute_geometry(width: u32, height: u32, text_ratio: f64) -> SplitGeometry {
    let mid_x = width / 2;
    // `as` saturates on overflow; the clamp covers ratios above 1
    let text_height = ((height as f64) * text_ratio).floor() as u32;
    let text_height = text_height.min(height);
    SplitGeometry {
        width,
        height,
        mid_x,
        text_height,
        door_height: height - text_height,
    }
}

impl SplitGeometry {
    pub fn region(&self, part: Part) -> Region {
        let (x, width) = match part {
            Part::LeftDoor | Part::LeftBottomText => (0, self.mid_x),
            Part::RightDoor | Part::RightBottomText => (self.mid_x, self.width - self.mid_x),
        };
        let (y, height) = match part {
            Part::LeftDoor | Part::RightDoor => (0, self.door_height),
            Part::LeftBottomText | Part::RightBottomText => (self.door_height, self.text_height),
        };
        Region { x, y, width, height }
    }

    pub fn regions(&self) -> [(Part, Region); 4] {
        Part::ALL.map(|part| (part, self.region(part)))
    }

    /// True when at least one of the four crops has no pixels.
    pub fn is_degenerate(&self) -> bool {
        Part::ALL.iter().any(|&part| self.region(part).is_empty())
    }
}
