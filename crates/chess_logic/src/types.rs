use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Color {
    White,
    Black,
}

impl Color {
    #[inline(always)]
    pub fn other(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    #[inline(always)]
    pub fn idx(self) -> usize {
        match self {
            Color::White => 0,
            Color::Black => 1,
        }
    }

    pub const ALL: [Color; 2] = [Color::White, Color::Black];
}

/// Piece kinds in table order: the discriminant indexes both the piece-value
/// and the piece-square tables.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PieceType {
    King,
    Queen,
    Bishop,
    Knight,
    Rook,
    Pawn,
}

impl PieceType {
    #[inline(always)]
    pub const fn idx(self) -> usize {
        match self {
            PieceType::King => 0,
            PieceType::Queen => 1,
            PieceType::Bishop => 2,
            PieceType::Knight => 3,
            PieceType::Rook => 4,
            PieceType::Pawn => 5,
        }
    }

    pub const ALL: [PieceType; 6] = [
        PieceType::King,
        PieceType::Queen,
        PieceType::Bishop,
        PieceType::Knight,
        PieceType::Rook,
        PieceType::Pawn,
    ];

    pub fn letter(self) -> char {
        match self {
            PieceType::King => 'K',
            PieceType::Queen => 'Q',
            PieceType::Bishop => 'B',
            PieceType::Knight => 'N',
            PieceType::Rook => 'R',
            PieceType::Pawn => 'P',
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Piece {
    pub color: Color,
    pub kind: PieceType,
}

impl Piece {
    #[inline(always)]
    pub const fn new(color: Color, kind: PieceType) -> Self {
        Piece { color, kind }
    }
}

/// Board square, A1 = 0 .. H8 = 63.
pub type Square = u8;

#[inline(always)]
pub const fn file_of(sq: Square) -> u8 {
    sq % 8
}

#[inline(always)]
pub const fn rank_of(sq: Square) -> u8 {
    sq / 8
}

#[inline(always)]
pub const fn square_at(file: u8, rank: u8) -> Square {
    rank * 8 + file
}

/// Mirror a square across the rank 4/5 boundary. The piece-square tables are
/// stored from Black's point of view; White squares go through this first.
#[inline(always)]
pub const fn flip_horizontal(sq: Square) -> Square {
    sq ^ 56
}

pub fn square_name(sq: Square) -> String {
    let f = (b'a' + file_of(sq)) as char;
    let r = (b'1' + rank_of(sq)) as char;
    format!("{f}{r}")
}

pub fn square_from_name(name: &str) -> Option<Square> {
    let b = name.as_bytes();
    if b.len() != 2 {
        return None;
    }
    if !(b'a'..=b'h').contains(&b[0]) || !(b'1'..=b'8').contains(&b[1]) {
        return None;
    }
    Some(square_at(b[0] - b'a', b[1] - b'1'))
}

/// Evaluation score in centipawns, white-POV unless stated otherwise.
pub type Score = i32;

pub const WIN_SCORE: Score = 100_000;
pub const LOSE_SCORE: Score = -WIN_SCORE;
pub const MIN_SCORE: Score = LOSE_SCORE - 1;
pub const MAX_SCORE: Score = WIN_SCORE + 1;
/// Scores above this line are certain victories (mate scores are
/// `WIN_SCORE - depth` and never dip this low for realistic depths).
pub const WIN_SCORE_THRESHOLD: Score = WIN_SCORE - 1_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    Move,
    Castle,
    PromotionQueen,
    PromotionRook,
    PromotionBishop,
    PromotionKnight,
    Pass,
    Forfeit,
}

impl Action {
    /// Piece the pawn turns into, for the four promotion actions.
    #[inline]
    pub fn promotion_kind(self) -> Option<PieceType> {
        match self {
            Action::PromotionQueen => Some(PieceType::Queen),
            Action::PromotionRook => Some(PieceType::Rook),
            Action::PromotionBishop => Some(PieceType::Bishop),
            Action::PromotionKnight => Some(PieceType::Knight),
            _ => None,
        }
    }
}

/// One half-move: which piece goes where, and how.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Turn {
    pub piece: Piece,
    pub from: Square,
    pub to: Square,
    pub action: Action,
}

impl Turn {
    pub const fn piece_move(piece: Piece, from: Square, to: Square) -> Self {
        Turn {
            piece,
            from,
            to,
            action: Action::Move,
        }
    }

    pub const fn castle(piece: Piece, from: Square, to: Square) -> Self {
        Turn {
            piece,
            from,
            to,
            action: Action::Castle,
        }
    }

    pub const fn promotion_queen(piece: Piece, from: Square, to: Square) -> Self {
        Turn {
            piece,
            from,
            to,
            action: Action::PromotionQueen,
        }
    }

    pub const fn promotion_rook(piece: Piece, from: Square, to: Square) -> Self {
        Turn {
            piece,
            from,
            to,
            action: Action::PromotionRook,
        }
    }

    pub const fn promotion_bishop(piece: Piece, from: Square, to: Square) -> Self {
        Turn {
            piece,
            from,
            to,
            action: Action::PromotionBishop,
        }
    }

    pub const fn promotion_knight(piece: Piece, from: Square, to: Square) -> Self {
        Turn {
            piece,
            from,
            to,
            action: Action::PromotionKnight,
        }
    }

    pub const fn pass(color: Color) -> Self {
        Turn {
            piece: Piece::new(color, PieceType::King),
            from: 0,
            to: 0,
            action: Action::Pass,
        }
    }

    pub const fn forfeit(color: Color) -> Self {
        Turn {
            piece: Piece::new(color, PieceType::King),
            from: 0,
            to: 0,
            action: Action::Forfeit,
        }
    }
}

impl fmt::Display for Turn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.action {
            Action::Pass => write!(f, "pass"),
            Action::Forfeit => write!(f, "forfeit"),
            Action::Castle => {
                if file_of(self.to) > file_of(self.from) {
                    write!(f, "O-O")
                } else {
                    write!(f, "O-O-O")
                }
            }
            _ => {
                if self.piece.kind != PieceType::Pawn {
                    write!(f, "{}", self.piece.kind.letter())?;
                }
                write!(f, "{}-{}", square_name(self.from), square_name(self.to))?;
                if let Some(kind) = self.action.promotion_kind() {
                    write!(f, "={}", kind.letter())?;
                }
                Ok(())
            }
        }
    }
}
