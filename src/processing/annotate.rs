// Debug overlay: outlines confidently recognized words on the source image
use image::{DynamicImage, Rgb, RgbImage};
use imageproc::drawing::draw_hollow_rect_mut;
use imageproc::rect::Rect;

use crate::models::Token;

const BOX_COLOR: Rgb<u8> = Rgb([0, 255, 0]);
const MIN_CONFIDENCE: f32 = 60.0;
const MIN_SIDE: u32 = 5;
const MIN_ASPECT: f32 = 0.2;

/// Tokens worth outlining: confident, not tiny, not a sliver.
pub fn is_drawable(token: &Token) -> bool {
    match (token.bbox, token.confidence) {
        (Some(bbox), Some(conf)) => {
            conf > MIN_CONFIDENCE
                && bbox.width > MIN_SIDE
                && bbox.height > MIN_SIDE
                && bbox.aspect_ratio() > MIN_ASPECT
        }
        _ => false,
    }
}

pub fn draw_token_boxes(image: &DynamicImage, tokens: &[Token]) -> RgbImage {
    let mut canvas = image.to_rgb8();
    for token in tokens.iter().filter(|t| is_drawable(t)) {
        if let Some(bbox) = token.bbox {
            let rect = Rect::at(bbox.left as i32, bbox.top as i32).of_size(bbox.width, bbox.height);
            draw_hollow_rect_mut(&mut canvas, rect, BOX_COLOR);
            // Second outline one pixel in for a 2px stroke
            let inner = Rect::at(bbox.left as i32 + 1, bbox.top as i32 + 1)
                .of_size(bbox.width - 2, bbox.height - 2);
            draw_hollow_rect_mut(&mut canvas, inner, BOX_COLOR);
        }
    }
    canvas
}
