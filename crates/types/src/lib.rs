//! Core types shared across the workspace
//! This crate contains pure data types with no external dependencies

/// Playfield dimensions
pub const BOARD_WIDTH: usize = 12;
pub const BOARD_HEIGHT: usize = 20;

/// Forced descent happens once the drop counter exceeds this many milliseconds
pub const DROP_INTERVAL_MS: u32 = 1000;

/// Default frame period of the terminal loop (~60 FPS)
pub const FRAME_MS: u32 = 16;

/// Points for the first row cleared in a sweep; doubles for every further row
pub const ROW_CLEAR_BASE_POINTS: u32 = 10;

/// Largest shape matrix side (the I piece)
pub const MAX_SHAPE_SIZE: usize = 4;

/// Tetromino piece kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    T,
    O,
    L,
    J,
    I,
    S,
    Z,
}

impl PieceKind {
    /// Spawn alphabet; a spawn draws one letter uniformly from it
    pub const SPAWN_ORDER: [PieceKind; 7] = [
        PieceKind::T,
        PieceKind::J,
        PieceKind::L,
        PieceKind::O,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::I,
    ];

    /// Numeric cell tag, doubling as the palette index (1..=7)
    pub fn cell_value(&self) -> u8 {
        match self {
            PieceKind::T => 1,
            PieceKind::O => 2,
            PieceKind::L => 3,
            PieceKind::J => 4,
            PieceKind::I => 5,
            PieceKind::S => 6,
            PieceKind::Z => 7,
        }
    }

    /// Inverse of [`PieceKind::cell_value`]; `0` and anything above 7 map to `None`
    pub fn from_cell_value(v: u8) -> Option<Self> {
        match v {
            1 => Some(PieceKind::T),
            2 => Some(PieceKind::O),
            3 => Some(PieceKind::L),
            4 => Some(PieceKind::J),
            5 => Some(PieceKind::I),
            6 => Some(PieceKind::S),
            7 => Some(PieceKind::Z),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::T => "T",
            PieceKind::O => "O",
            PieceKind::L => "L",
            PieceKind::J => "J",
            PieceKind::I => "I",
            PieceKind::S => "S",
            PieceKind::Z => "Z",
        }
    }
}

/// Cell on the board (None = empty, Some = settled or active material)
pub type Cell = Option<PieceKind>;

/// Lifecycle of a game session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RunState {
    #[default]
    Running,
    Paused,
    GameOver,
}

impl RunState {
    pub fn as_str(&self) -> &'static str {
        match self {
            RunState::Running => "running",
            RunState::Paused => "paused",
            RunState::GameOver => "game_over",
        }
    }
}

/// Logical player commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    MoveLeft,
    MoveRight,
    SoftDrop,
    HardDrop,
    RotateCw,
    RotateCcw,
    TogglePause,
    Restart,
}

impl GameAction {
    /// Convert to string
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::SoftDrop => "softDrop",
            GameAction::HardDrop => "hardDrop",
            GameAction::RotateCw => "rotateCw",
            GameAction::RotateCcw => "rotateCcw",
            GameAction::TogglePause => "togglePause",
            GameAction::Restart => "restart",
        }
    }

    /// Whether the command moves or drops the active piece (accepted only while running)
    pub fn is_piece_control(&self) -> bool {
        !matches!(self, GameAction::TogglePause | GameAction::Restart)
    }
}
