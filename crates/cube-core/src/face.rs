use cube_detection::CubeColor;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Face {
    Up,
    Right,
    Front,
    Down,
    Left,
    Back,
}

impl Face {
    /// Scan order, which is also the block order the solver expects.
    pub const ORDER: [Face; 6] = [
        Face::Up,
        Face::Right,
        Face::Front,
        Face::Down,
        Face::Left,
        Face::Back,
    ];

    pub const fn letter(self) -> char {
        match self {
            Face::Up => 'U',
            Face::Right => 'R',
            Face::Front => 'F',
            Face::Down => 'D',
            Face::Left => 'L',
            Face::Back => 'B',
        }
    }

    // Center sticker color when held white-up, green-front.
    pub const fn center_color(self) -> CubeColor {
        match self {
            Face::Up => CubeColor::White,
            Face::Right => CubeColor::Red,
            Face::Front => CubeColor::Green,
            Face::Down => CubeColor::Yellow,
            Face::Left => CubeColor::Orange,
            Face::Back => CubeColor::Blue,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Face::Up => "Up",
            Face::Right => "Right",
            Face::Front => "Front",
            Face::Down => "Down",
            Face::Left => "Left",
            Face::Back => "Back",
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }
}

impl std::fmt::Display for Face {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name(), self.center_color())
    }
}
