//! SVG path data: parsing, transforming and serializing `d` attributes
//!
//! Glyph outlines arrive as path data strings in font units. They are parsed
//! into [`PathSegment`]s so that scaling and translation can be applied to
//! coordinates without string surgery, then written back out with
//! [`PathData::to_svg_d`].

pub mod lexer;

use std::fmt;

use thiserror::Error;

use crate::geometry::Point;
use crate::number::format_number;

use lexer::Token;

/// Errors produced while parsing path data
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PathError {
    /// Characters that are neither a command nor a number
    #[error("unexpected input at offset {offset}")]
    UnexpectedInput { offset: usize },

    /// Numbers that do not follow any command
    #[error("expected a path command at offset {offset}")]
    ExpectedCommand { offset: usize },

    /// A command without enough numbers for its parameters
    #[error("command '{command}' at offset {offset} is missing arguments")]
    MissingArguments { command: char, offset: usize },
}

/// A single path command with its parameters
///
/// `relative` marks the lowercase form of a command, whose coordinates are
/// offsets from the current point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathSegment {
    MoveTo {
        relative: bool,
        to: Point,
    },
    LineTo {
        relative: bool,
        to: Point,
    },
    HorizontalTo {
        relative: bool,
        x: f64,
    },
    VerticalTo {
        relative: bool,
        y: f64,
    },
    CubicTo {
        relative: bool,
        control1: Point,
        control2: Point,
        to: Point,
    },
    SmoothCubicTo {
        relative: bool,
        control2: Point,
        to: Point,
    },
    QuadraticTo {
        relative: bool,
        control: Point,
        to: Point,
    },
    SmoothQuadraticTo {
        relative: bool,
        to: Point,
    },
    ArcTo {
        relative: bool,
        rx: f64,
        ry: f64,
        rotation: f64,
        large_arc: bool,
        sweep: bool,
        to: Point,
    },
    Close {
        relative: bool,
    },
}

impl PathSegment {
    /// Command letter for this segment
    pub fn command(&self) -> char {
        let (upper, relative) = match self {
            PathSegment::MoveTo { relative, .. } => ('M', *relative),
            PathSegment::LineTo { relative, .. } => ('L', *relative),
            PathSegment::HorizontalTo { relative, .. } => ('H', *relative),
            PathSegment::VerticalTo { relative, .. } => ('V', *relative),
            PathSegment::CubicTo { relative, .. } => ('C', *relative),
            PathSegment::SmoothCubicTo { relative, .. } => ('S', *relative),
            PathSegment::QuadraticTo { relative, .. } => ('Q', *relative),
            PathSegment::SmoothQuadraticTo { relative, .. } => ('T', *relative),
            PathSegment::ArcTo { relative, .. } => ('A', *relative),
            PathSegment::Close { relative } => ('Z', *relative),
        };
        if relative {
            upper.to_ascii_lowercase()
        } else {
            upper
        }
    }

    fn arguments(&self) -> Vec<f64> {
        match *self {
            PathSegment::MoveTo { to, .. }
            | PathSegment::LineTo { to, .. }
            | PathSegment::SmoothQuadraticTo { to, .. } => vec![to.x, to.y],
            PathSegment::HorizontalTo { x, .. } => vec![x],
            PathSegment::VerticalTo { y, .. } => vec![y],
            PathSegment::CubicTo {
                control1,
                control2,
                to,
                ..
            } => vec![control1.x, control1.y, control2.x, control2.y, to.x, to.y],
            PathSegment::SmoothCubicTo { control2, to, .. } => {
                vec![control2.x, control2.y, to.x, to.y]
            }
            PathSegment::QuadraticTo { control, to, .. } => {
                vec![control.x, control.y, to.x, to.y]
            }
            PathSegment::ArcTo {
                rx,
                ry,
                rotation,
                large_arc,
                sweep,
                to,
                ..
            } => vec![
                rx,
                ry,
                rotation,
                if large_arc { 1.0 } else { 0.0 },
                if sweep { 1.0 } else { 0.0 },
                to.x,
                to.y,
            ],
            PathSegment::Close { .. } => vec![],
        }
    }

    /// Apply a transform to this segment
    ///
    /// `absolute_start` forces a relative move to be treated as absolute,
    /// which is how a leading `m` is interpreted. It is written back as `M`
    /// so the path can be appended to others.
    fn transformed(&self, t: &Transform, absolute_start: bool) -> PathSegment {
        match *self {
            PathSegment::MoveTo { relative, to } => {
                let relative = relative && !absolute_start;
                PathSegment::MoveTo {
                    relative,
                    to: t.apply(to, relative),
                }
            }
            PathSegment::LineTo { relative, to } => PathSegment::LineTo {
                relative,
                to: t.apply(to, relative),
            },
            PathSegment::HorizontalTo { relative, x } => PathSegment::HorizontalTo {
                relative,
                x: if relative { x * t.sx } else { x * t.sx + t.tx },
            },
            PathSegment::VerticalTo { relative, y } => PathSegment::VerticalTo {
                relative,
                y: if relative { y * t.sy } else { y * t.sy + t.ty },
            },
            PathSegment::CubicTo {
                relative,
                control1,
                control2,
                to,
            } => PathSegment::CubicTo {
                relative,
                control1: t.apply(control1, relative),
                control2: t.apply(control2, relative),
                to: t.apply(to, relative),
            },
            PathSegment::SmoothCubicTo {
                relative,
                control2,
                to,
            } => PathSegment::SmoothCubicTo {
                relative,
                control2: t.apply(control2, relative),
                to: t.apply(to, relative),
            },
            PathSegment::QuadraticTo {
                relative,
                control,
                to,
            } => PathSegment::QuadraticTo {
                relative,
                control: t.apply(control, relative),
                to: t.apply(to, relative),
            },
            PathSegment::SmoothQuadraticTo { relative, to } => PathSegment::SmoothQuadraticTo {
                relative,
                to: t.apply(to, relative),
            },
            PathSegment::ArcTo {
                relative,
                rx,
                ry,
                rotation,
                large_arc,
                sweep,
                to,
            } => {
                // A reflection reverses the direction the arc is swept in.
                // Rotation is exact for uniform scales only.
                let mirrored = t.sx * t.sy < 0.0;
                PathSegment::ArcTo {
                    relative,
                    rx: rx * t.sx.abs(),
                    ry: ry * t.sy.abs(),
                    rotation: if mirrored { -rotation } else { rotation },
                    large_arc,
                    sweep: sweep != mirrored,
                    to: t.apply(to, relative),
                }
            }
            PathSegment::Close { relative } => PathSegment::Close { relative },
        }
    }
}

/// Axis-aligned affine transform: scale, then translate
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub sx: f64,
    pub sy: f64,
    pub tx: f64,
    pub ty: f64,
}

impl Transform {
    pub fn identity() -> Self {
        Self::new(1.0, 1.0, 0.0, 0.0)
    }

    pub fn new(sx: f64, sy: f64, tx: f64, ty: f64) -> Self {
        Self { sx, sy, tx, ty }
    }

    pub fn scale(sx: f64, sy: f64) -> Self {
        Self::new(sx, sy, 0.0, 0.0)
    }

    pub fn translate(tx: f64, ty: f64) -> Self {
        Self::new(1.0, 1.0, tx, ty)
    }

    /// Compose: apply `self` first, then `next`
    pub fn then(&self, next: &Transform) -> Transform {
        Transform {
            sx: self.sx * next.sx,
            sy: self.sy * next.sy,
            tx: self.tx * next.sx + next.tx,
            ty: self.ty * next.sy + next.ty,
        }
    }

    /// Map a point; relative offsets only pick up the scale
    pub fn apply(&self, p: Point, relative: bool) -> Point {
        if relative {
            Point::new(p.x * self.sx, p.y * self.sy)
        } else {
            Point::new(p.x * self.sx + self.tx, p.y * self.sy + self.ty)
        }
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

/// Parsed path data
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PathData {
    segments: Vec<PathSegment>,
}

impl PathData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_segments(segments: Vec<PathSegment>) -> Self {
        Self { segments }
    }

    /// Parse an SVG path `d` attribute
    pub fn parse(input: &str) -> Result<Self, PathError> {
        parse(input)
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn push(&mut self, segment: PathSegment) {
        self.segments.push(segment);
    }

    /// Append another path's segments after this one's
    pub fn extend(&mut self, other: PathData) {
        self.segments.extend(other.segments);
    }

    /// Return a copy with every coordinate mapped through `transform`
    pub fn transformed(&self, transform: &Transform) -> PathData {
        let segments = self
            .segments
            .iter()
            .enumerate()
            .map(|(i, seg)| seg.transformed(transform, i == 0))
            .collect();
        PathData { segments }
    }

    /// Return a copy shifted by `(dx, dy)`
    pub fn translated(&self, dx: f64, dy: f64) -> PathData {
        self.transformed(&Transform::translate(dx, dy))
    }

    /// Convert to SVG path `d` attribute string
    pub fn to_svg_d(&self) -> String {
        self.segments
            .iter()
            .map(|seg| {
                let mut part = seg.command().to_string();
                for arg in seg.arguments() {
                    part.push(' ');
                    part.push_str(&format_number(arg));
                }
                part
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for PathData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_svg_d())
    }
}

/// Number of parameters a command consumes per repetition
fn arity(command: char) -> usize {
    match command.to_ascii_uppercase() {
        'M' | 'L' | 'T' => 2,
        'H' | 'V' => 1,
        'C' => 6,
        'S' | 'Q' => 4,
        'A' => 7,
        _ => 0,
    }
}

fn build_segment(command: char, args: &[f64]) -> PathSegment {
    let relative = command.is_ascii_lowercase();
    let point = |i: usize| Point::new(args[i], args[i + 1]);
    match command.to_ascii_uppercase() {
        'M' => PathSegment::MoveTo {
            relative,
            to: point(0),
        },
        'L' => PathSegment::LineTo {
            relative,
            to: point(0),
        },
        'H' => PathSegment::HorizontalTo { relative, x: args[0] },
        'V' => PathSegment::VerticalTo { relative, y: args[0] },
        'C' => PathSegment::CubicTo {
            relative,
            control1: point(0),
            control2: point(2),
            to: point(4),
        },
        'S' => PathSegment::SmoothCubicTo {
            relative,
            control2: point(0),
            to: point(2),
        },
        'Q' => PathSegment::QuadraticTo {
            relative,
            control: point(0),
            to: point(2),
        },
        'T' => PathSegment::SmoothQuadraticTo {
            relative,
            to: point(0),
        },
        'A' => PathSegment::ArcTo {
            relative,
            rx: args[0],
            ry: args[1],
            rotation: args[2],
            large_arc: args[3] != 0.0,
            sweep: args[4] != 0.0,
            to: point(5),
        },
        _ => PathSegment::Close { relative },
    }
}

/// Parse an SVG path `d` attribute into segments
///
/// Repeated parameter groups after a command are implicit repetitions of it;
/// extra pairs after a move are line segments.
pub fn parse(input: &str) -> Result<PathData, PathError> {
    let mut tokens = Vec::new();
    for (tok, span) in lexer::lex(input) {
        match tok {
            Ok(tok) => tokens.push((tok, span)),
            Err(()) => return Err(PathError::UnexpectedInput { offset: span.start }),
        }
    }

    let mut segments = Vec::new();
    let mut pos = 0;

    while pos < tokens.len() {
        let (mut command, offset) = match &tokens[pos] {
            (Token::Command(c), span) => (*c, span.start),
            (Token::Number(_), span) => {
                return Err(PathError::ExpectedCommand { offset: span.start })
            }
        };
        pos += 1;

        let count = arity(command);
        if count == 0 {
            segments.push(build_segment(command, &[]));
            continue;
        }

        loop {
            let read = if command.eq_ignore_ascii_case(&'a') {
                read_arc_arguments(input, &mut tokens, pos)
            } else {
                read_arguments(&tokens, pos, count)
            };
            let (args, next) = read.ok_or(PathError::MissingArguments { command, offset })?;
            pos = next;
            segments.push(build_segment(command, &args));

            if !matches!(tokens.get(pos), Some((Token::Number(_), _))) {
                break;
            }
            command = match command {
                'M' => 'L',
                'm' => 'l',
                other => other,
            };
        }
    }

    Ok(PathData { segments })
}

/// Read `count` numbers starting at `pos`, returning them and the next position
fn read_arguments(tokens: &[(Token, lexer::Span)], pos: usize, count: usize) -> Option<(Vec<f64>, usize)> {
    let args: Vec<f64> = tokens[pos..]
        .iter()
        .take(count)
        .map_while(|(tok, _)| match tok {
            Token::Number(n) => Some(*n),
            Token::Command(_) => None,
        })
        .collect();
    (args.len() == count).then_some((args, pos + count))
}

/// Read the seven arc parameters starting at `pos`
///
/// The two flags are single `0`/`1` characters and need no separator, so
/// `a5 5 0 01 10 10` lexes `01` as one number holding both flags. A number
/// token that starts with a flag is split, and its remainder is left in
/// place as the next token.
fn read_arc_arguments(
    input: &str,
    tokens: &mut [(Token, lexer::Span)],
    mut pos: usize,
) -> Option<(Vec<f64>, usize)> {
    let mut args = Vec::with_capacity(7);
    while args.len() < 7 {
        let (tok, span) = tokens.get(pos)?.clone();
        let Token::Number(n) = tok else {
            return None;
        };

        if args.len() == 3 || args.len() == 4 {
            let text = &input[span.clone()];
            let flag = match text.as_bytes().first() {
                Some(b'0') => 0.0,
                Some(b'1') => 1.0,
                _ => return None,
            };
            if text.len() > 1 {
                let rest: f64 = text[1..].parse().ok()?;
                tokens[pos] = (Token::Number(rest), span.start + 1..span.end);
            } else {
                pos += 1;
            }
            args.push(flag);
        } else {
            args.push(n);
            pos += 1;
        }
    }
    Some((args, pos))
}
