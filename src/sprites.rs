//! ASCII-art frames for the bomb and its explosion.

use unicode_width::UnicodeWidthStr;

use crate::animation::Animation;

/// A frame handle: rows of text drawn top to bottom. Spaces are transparent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sprite {
    rows: &'static [&'static str],
}

impl Sprite {
    pub const fn new(rows: &'static [&'static str]) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &'static [&'static str] {
        self.rows
    }

    pub fn width(&self) -> usize {
        self.rows.iter().map(|r| r.width()).max().unwrap_or(0)
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }
}

const BOMB: [Sprite; 2] = [
    Sprite::new(&[
        "      , *  ",
        "     /     ",
        "   .-'-.   ",
        "  /     \\  ",
        " |       | ",
        "  \\     /  ",
        "   '---'   ",
    ]),
    Sprite::new(&[
        "      ,' * ",
        "     /  '  ",
        "   .-'-.   ",
        "  /     \\  ",
        " |       | ",
        "  \\     /  ",
        "   '---'   ",
    ]),
];

const EXPLOSION: [Sprite; 9] = [
    Sprite::new(&["", "", "", "        *        ", "", "", ""]),
    Sprite::new(&["", "", "       .*.       ", "      *#@#*      ", "       '*'       ", "", ""]),
    Sprite::new(&[
        "",
        "      . * .      ",
        "     *#@@@#*     ",
        "    * @@@@@ *    ",
        "     *#@@@#*     ",
        "      ' * '      ",
        "",
    ]),
    Sprite::new(&[
        "     .  *  .     ",
        "   *  #@@@#  *   ",
        "  . #@@@@@@@# .  ",
        " *  @@@@@@@@@  * ",
        "  ' #@@@@@@@# '  ",
        "   *  #@@@#  *   ",
        "     '  *  '     ",
    ]),
    Sprite::new(&[
        "  *   . # .   *  ",
        "    #@@@@@@@#    ",
        " . @@@@###@@@@ . ",
        "*  @@@#   #@@@  *",
        " ' @@@@###@@@@ ' ",
        "    #@@@@@@@#    ",
        "  *   ' # '   *  ",
    ]),
    Sprite::new(&[
        " *  .  # #  .  * ",
        "   #@@#   #@@#   ",
        " .@@#       #@@. ",
        "*@@#         #@@*",
        " '@@#       #@@' ",
        "   #@@#   #@@#   ",
        " *  '  # #  '  * ",
    ]),
    Sprite::new(&[
        "*   .  #   #  .  ",
        "  #@#       #@#  ",
        " @#           #@ ",
        "#@             @#",
        " @#           #@ ",
        "  #@#       #@#  ",
        "*   '  #   #  ' *",
    ]),
    Sprite::new(&[
        ".    .       .   ",
        "  #           #  ",
        " #             # ",
        "#               #",
        " #             # ",
        "  #           #  ",
        "'     '     '    ",
    ]),
    Sprite::new(&[
        "      .     .    ",
        " .              .",
        "",
        ".               .",
        "",
        "  '            ' ",
        "      '    '     ",
    ]),
];

/// Top-left of the bomb relative to the top-centre of the play area.
pub const BOMB_ANCHOR: (i32, i32) = (-5, 3);
/// Top-left of the explosion relative to the top-centre of the play area.
pub const EXPLOSION_ANCHOR: (i32, i32) = (-8, 3);

/// Idle loop: the two bomb frames, each held for `duplication + 1` ticks.
pub fn bomb_animation(duplication: usize) -> Animation<Sprite> {
    let mut anim = Animation::looping(BOMB_ANCHOR.0, BOMB_ANCHOR.1);
    for frame in BOMB {
        anim.add_frame(frame, (0, 0));
    }
    anim.duplicate_all_frames(duplication);
    anim
}

/// One-shot: the nine explosion frames, each held for `duplication + 1` ticks.
pub fn explosion_animation(duplication: usize) -> Animation<Sprite> {
    let mut anim = Animation::one_shot(EXPLOSION_ANCHOR.0, EXPLOSION_ANCHOR.1);
    anim.set_frames(EXPLOSION.to_vec());
    anim.duplicate_all_frames(duplication);
    anim
}
