//! Built-in face artwork
//!
//! Masks are one byte per row, MSB on the left.

use super::catalog::Mood;
use super::frame::{Frame, Rgb};

const YELLOW: Rgb = Rgb::new(255, 200, 0);
const BLUE: Rgb = Rgb::new(40, 90, 255);
const TEAR: Rgb = Rgb::new(120, 200, 255);
const RED: Rgb = Rgb::new(255, 20, 0);
const ORANGE: Rgb = Rgb::new(255, 120, 0);
const CYAN: Rgb = Rgb::new(0, 200, 200);
const GLINT: Rgb = Rgb::new(255, 255, 255);
const GREEN: Rgb = Rgb::new(40, 200, 80);
const PINK: Rgb = Rgb::new(255, 40, 120);
const NIGHT: Rgb = Rgb::new(20, 20, 90);

const fn face(rows: [u8; 8], color: Rgb) -> Frame {
    Frame::from_mask(rows, color, Rgb::BLACK)
}

static HAPPY: [Frame; 3] = [
    face(
        [
            0b00000000, 0b01100110, 0b01100110, 0b00000000, 0b10000001, 0b01000010, 0b00111100,
            0b00000000,
        ],
        YELLOW,
    ),
    face(
        [
            0b00000000, 0b00000000, 0b01100110, 0b00000000, 0b10000001, 0b01000010, 0b00111100,
            0b00000000,
        ],
        YELLOW,
    ),
    face(
        [
            0b00000000, 0b01100110, 0b01100110, 0b00000000, 0b00000000, 0b10000001, 0b01000010,
            0b00111100,
        ],
        YELLOW,
    ),
];

const SAD_BASE: [u8; 8] = [
    0b00000000, 0b01100110, 0b01100110, 0b00000000, 0b00000000, 0b00111100, 0b01000010,
    0b10000001,
];

static SAD: [Frame; 3] = [
    face(SAD_BASE, BLUE).with_pixel(6, 3, TEAR),
    face(SAD_BASE, BLUE).with_pixel(6, 4, TEAR),
    face(SAD_BASE, BLUE),
];

const ANGRY_FACE: [u8; 8] = [
    0b10000001, 0b01000010, 0b01100110, 0b00000000, 0b00000000, 0b01111110, 0b10000001,
    0b00000000,
];

static ANGRY: [Frame; 3] = [
    face(ANGRY_FACE, RED),
    Frame::solid(RED),
    face(ANGRY_FACE, RED),
];

static SURPRISED: [Frame; 2] = [
    face(
        [
            0b00000000, 0b01100110, 0b01100110, 0b00000000, 0b00011000, 0b00100100, 0b00011000,
            0b00000000,
        ],
        ORANGE,
    ),
    face(
        [
            0b00000000, 0b01100110, 0b01100110, 0b00000000, 0b00000000, 0b00011000, 0b00000000,
            0b00000000,
        ],
        ORANGE,
    ),
];

const COOL_FACE: [u8; 8] = [
    0b00000000, 0b11111111, 0b01110111, 0b00100010, 0b00000000, 0b01000010, 0b00111100,
    0b00000000,
];

static COOL: [Frame; 2] = [
    face(COOL_FACE, CYAN),
    face(COOL_FACE, CYAN).with_pixel(1, 2, GLINT),
];

static CALM: [Frame; 2] = [
    face(
        [
            0b00000000, 0b00000000, 0b01100110, 0b00000000, 0b00000000, 0b00111100, 0b00000000,
            0b00000000,
        ],
        GREEN,
    ),
    face(
        [
            0b00000000, 0b00000000, 0b01100110, 0b00000000, 0b00000000, 0b01000010, 0b00111100,
            0b00000000,
        ],
        GREEN,
    ),
];

const BIG_HEART: [u8; 8] = [
    0b01100110, 0b11111111, 0b11111111, 0b11111111, 0b01111110, 0b00111100, 0b00011000,
    0b00000000,
];

const SMALL_HEART: [u8; 8] = [
    0b00000000, 0b00100100, 0b01111110, 0b01111110, 0b00111100, 0b00011000, 0b00000000,
    0b00000000,
];

static LOVE: [Frame; 4] = [
    face(BIG_HEART, PINK),
    face(SMALL_HEART, PINK),
    face(SMALL_HEART, PINK)
        .with_pixel(0, 0, PINK)
        .with_pixel(7, 7, PINK),
    face(SMALL_HEART, PINK)
        .with_pixel(7, 0, PINK)
        .with_pixel(0, 7, PINK),
];

pub const HAPPY_INDEX: u8 = 0;
pub const SAD_INDEX: u8 = 1;
pub const ANGRY_INDEX: u8 = 2;
pub const SURPRISED_INDEX: u8 = 3;
pub const COOL_INDEX: u8 = 4;
pub const CALM_INDEX: u8 = 5;
pub const LOVE_INDEX: u8 = 6;

/// Built-in moods, in index order
pub static BUILTIN_MOODS: [Mood<'static>; 7] = [
    Mood::new("happy", &HAPPY, 4),
    Mood::new("sad", &SAD, 3),
    Mood::new("angry", &ANGRY, 6),
    Mood::new("surprised", &SURPRISED, 4),
    Mood::new("cool", &COOL, 3),
    Mood::new("calm", &CALM, 2),
    Mood::new("love", &LOVE, 5),
];

/// Closed eyes with a "z", drawn dim
pub const SLEEP_FACE: Frame = Frame::from_mask(
    [
        0b00001110, 0b00000100, 0b00001110, 0b00000000, 0b01100110, 0b00000000, 0b00011000,
        0b00000000,
    ],
    NIGHT,
    Rgb::BLACK,
);

/// One cycle of the flip reaction
pub static FLASH: [Frame; 2] = [Frame::solid(Rgb::WHITE), Frame::BLANK];
