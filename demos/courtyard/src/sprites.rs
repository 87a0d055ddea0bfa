//! Hero animation table and the stand-in textures used when the asset
//! files are missing.

use image::{Rgba, RgbaImage};
use stage2d::{AnimationError, AnimationLibrary, FrameSelection, Repeat, SpriteSheet};

pub const HERO_FRAME: u32 = 48;
pub const HERO_COLUMNS: u32 = 4;
pub const HERO_ROWS: u32 = 4;
pub const HERO_FRAME_RATE: f32 = 10.0;

/// File names looked up in the asset directory.
pub const HERO_SHEET_FILE: &str = "character_base_48x48.png";
pub const WALL_FILE: &str = "platform.png";
pub const TROPHY_FILE: &str = "gold_trophy_32x32.png";

/// Walk cycles use one sheet row each, idles a single frame of that row.
pub const HERO_ANIMATIONS: [(&str, FrameSelection); 8] = [
    ("left", FrameSelection::Range { start: 12, end: 15 }),
    ("right", FrameSelection::Range { start: 8, end: 11 }),
    ("up", FrameSelection::Range { start: 4, end: 7 }),
    ("down", FrameSelection::Range { start: 0, end: 3 }),
    ("turn_l", FrameSelection::Range { start: 12, end: 12 }),
    ("turn_r", FrameSelection::Range { start: 8, end: 8 }),
    ("turn_u", FrameSelection::Range { start: 4, end: 4 }),
    ("turn_d", FrameSelection::Range { start: 0, end: 0 }),
];

pub fn hero_sheet() -> SpriteSheet {
    SpriteSheet::new(HERO_FRAME, HERO_FRAME, HERO_COLUMNS, HERO_ROWS)
}

/// Register every hero animation over `sheet`.
pub fn hero_animations(sheet: SpriteSheet) -> Result<AnimationLibrary, AnimationError> {
    let mut library = AnimationLibrary::new(sheet);
    for (key, frames) in &HERO_ANIMATIONS {
        library.create(key, frames, HERO_FRAME_RATE, Repeat::Once)?;
    }
    Ok(library)
}

const OUTLINE: Rgba<u8> = Rgba([34, 32, 52, 255]);
const SKIN: Rgba<u8> = Rgba([238, 195, 154, 255]);
const TUNIC: Rgba<u8> = Rgba([91, 110, 225, 255]);
const BOOTS: Rgba<u8> = Rgba([102, 57, 49, 255]);

/// A 4 x 4 sheet of 48 px frames. Rows face down, up, right, left; columns
/// are walk steps.
pub fn generate_hero_sheet() -> RgbaImage {
    let mut sheet = RgbaImage::new(HERO_FRAME * HERO_COLUMNS, HERO_FRAME * HERO_ROWS);
    for row in 0..HERO_ROWS {
        for col in 0..HERO_COLUMNS {
            draw_hero_frame(&mut sheet, col * HERO_FRAME, row * HERO_FRAME, row, col);
        }
    }
    sheet
}

fn draw_hero_frame(img: &mut RgbaImage, ox: u32, oy: u32, row: u32, step: u32) {
    // Legs alternate on odd steps.
    let stride = if step % 2 == 1 { 3 } else { 0 };
    let (left_leg, right_leg) = if step == 1 { (stride, 0) } else { (0, stride) };

    fill_rect(img, ox + 16, oy + 8, 16, 14, OUTLINE);
    fill_rect(img, ox + 17, oy + 9, 14, 12, SKIN);
    fill_rect(img, ox + 14, oy + 22, 20, 14, OUTLINE);
    fill_rect(img, ox + 15, oy + 23, 18, 12, TUNIC);
    fill_rect(img, ox + 17, oy + 36 - left_leg, 5, 8, BOOTS);
    fill_rect(img, ox + 26, oy + 36 - right_leg, 5, 8, BOOTS);

    // Eyes show which way the frame faces.
    match row {
        0 => {
            fill_rect(img, ox + 20, oy + 14, 2, 3, OUTLINE);
            fill_rect(img, ox + 26, oy + 14, 2, 3, OUTLINE);
        }
        1 => fill_rect(img, ox + 17, oy + 9, 14, 5, BOOTS),
        2 => fill_rect(img, ox + 27, oy + 14, 2, 3, OUTLINE),
        _ => fill_rect(img, ox + 19, oy + 14, 2, 3, OUTLINE),
    }
}

/// 400 x 32 stone slab.
pub fn generate_wall() -> RgbaImage {
    let (width, height) = (400, 32);
    RgbaImage::from_fn(width, height, |x, y| {
        let edge = x < 2 || y < 2 || x >= width - 2 || y >= height - 2;
        let mortar = y == height / 2 || (x + if y < height / 2 { 0 } else { 25 }) % 50 == 0;
        if edge {
            Rgba([74, 68, 88, 255])
        } else if mortar {
            Rgba([120, 112, 128, 255])
        } else {
            Rgba([156, 148, 160, 255])
        }
    })
}

/// 32 x 32 gold cup on a transparent background.
pub fn generate_trophy() -> RgbaImage {
    let mut img = RgbaImage::new(32, 32);
    let gold = Rgba([242, 196, 54, 255]);
    let shine = Rgba([255, 236, 150, 255]);
    let base = Rgba([150, 104, 32, 255]);

    fill_rect(&mut img, 8, 4, 16, 12, gold);
    fill_rect(&mut img, 4, 6, 4, 6, gold);
    fill_rect(&mut img, 24, 6, 4, 6, gold);
    fill_rect(&mut img, 11, 6, 3, 7, shine);
    fill_rect(&mut img, 14, 16, 4, 6, gold);
    fill_rect(&mut img, 9, 22, 14, 3, base);
    fill_rect(&mut img, 7, 25, 18, 4, base);
    img
}

fn fill_rect(img: &mut RgbaImage, x: u32, y: u32, w: u32, h: u32, color: Rgba<u8>) {
    let x_end = (x + w).min(img.width());
    let y_end = (y + h).min(img.height());
    for py in y..y_end {
        for px in x..x_end {
            img.put_pixel(px, py, color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hero_table_fits_the_sheet() {
        let library = hero_animations(hero_sheet()).unwrap();
        assert_eq!(library.len(), HERO_ANIMATIONS.len());
        assert_eq!(library.get("left").unwrap().frames, vec![12, 13, 14, 15]);
        assert_eq!(library.get("turn_u").unwrap().frames, vec![4]);
    }

    #[test]
    fn generated_sheet_matches_frame_grid() {
        let img = generate_hero_sheet();
        let sheet =
            SpriteSheet::from_texture_size(img.width(), img.height(), HERO_FRAME, HERO_FRAME)
                .unwrap();
        assert_eq!(sheet, hero_sheet());
        // Corners stay transparent.
        assert_eq!(img.get_pixel(0, 0)[3], 0);
    }

    #[test]
    fn generated_props_have_expected_sizes() {
        assert_eq!(generate_wall().dimensions(), (400, 32));
        let trophy = generate_trophy();
        assert_eq!(trophy.dimensions(), (32, 32));
        assert_eq!(trophy.get_pixel(16, 8)[3], 255);
    }
}
