//! Piece registry and per-piece parameter layout.
//!
//! The set of piece kinds is closed. Each kind declares, statically:
//! - its category (selector, operator, trick, ...)
//! - its parameter slots ([`ParamSpec`]), in a fixed order
//! - its output ([`Output`])
//!
//! A [`Piece`] pairs a kind with the side each of its slots reads from.

use std::fmt;
use std::hash::{Hash, Hasher};

use smallvec::SmallVec;

use crate::coord::Side;
use crate::value::ValueType;

/// Upper bound on parameter slots for any piece kind.
pub const MAX_PARAMS: usize = 3;

/// Common parameter names.
pub mod param {
    pub const TARGET: &str = "target";
    pub const TIME: &str = "time";
    pub const NUMBER: &str = "number";
    pub const POSITION: &str = "position";
    pub const DIRECTION: &str = "direction";
    pub const SPEED: &str = "speed";
    pub const POWER: &str = "power";
    pub const VECTOR: &str = "vector";
    pub const FACTOR: &str = "factor";
    pub const CONDITION: &str = "condition";
    pub const COUNT: &str = "count";
    pub const BODY: &str = "body";
    pub const THEN: &str = "then";
    pub const OTHERWISE: &str = "otherwise";
    pub const A: &str = "a";
    pub const B: &str = "b";
    pub const X: &str = "x";
    pub const Y: &str = "y";
    pub const Z: &str = "z";
}

/// A numeric literal stored in a constant piece.
///
/// Compared and hashed by bit pattern so that grids holding literals can be
/// used as cache keys. `-0.0` is normalised to `0.0`.
#[derive(Copy, Clone)]
pub struct Literal(f64);

impl Literal {
    pub const ZERO: Literal = Literal(0.0);

    pub fn new(value: f64) -> Self {
        if value == 0.0 {
            Literal(0.0)
        } else {
            Literal(value)
        }
    }

    #[inline]
    pub fn get(self) -> f64 {
        self.0
    }
}

impl PartialEq for Literal {
    fn eq(&self, other: &Self) -> bool {
        self.0.to_bits() == other.0.to_bits()
    }
}

impl Eq for Literal {}

impl Hash for Literal {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.to_bits().hash(state);
    }
}

impl fmt::Debug for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Broad role of a piece kind.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum PieceCategory {
    /// Reads something from the cast context (caster, loop index, ...).
    Selector,
    /// A literal typed into the piece.
    Constant,
    /// Pure computation over its inputs.
    Operator,
    /// Forwards its single input; resolved away at compile time.
    Connector,
    /// Adjusts spell metadata; never executed.
    Modifier,
    /// Runtime effect against the world or the cast.
    Trick,
    /// Schedules other tricks through the action stack.
    Control,
}

impl PieceCategory {
    /// Whether pieces of this category become runtime actions.
    pub fn is_action(self) -> bool {
        matches!(self, PieceCategory::Trick | PieceCategory::Control)
    }
}

/// Type accepted by a parameter slot.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ParamType {
    Number,
    Vector,
    Entity,
    /// Any value-producing piece.
    Any,
    /// A trick piece scheduled by a control piece.
    Action,
}

impl ParamType {
    /// Whether a producer of type `ty` may feed this slot.
    pub fn accepts(self, ty: ValueType) -> bool {
        match self {
            ParamType::Number => ty == ValueType::Number,
            ParamType::Vector => ty == ValueType::Vector,
            ParamType::Entity => ty == ValueType::Entity,
            ParamType::Any => true,
            ParamType::Action => false,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ParamType::Number => "number",
            ParamType::Vector => "vector",
            ParamType::Entity => "entity",
            ParamType::Any => "any value",
            ParamType::Action => "trick",
        }
    }
}

/// What an unconnected slot resolves to.
#[derive(Copy, Clone, PartialEq, Debug)]
pub enum Fallback {
    /// The slot must be connected.
    Required,
    /// Defaults to a number.
    Number(f64),
    /// Defaults to null.
    Null,
    /// Optional action slot; nothing is scheduled.
    NoAction,
}

/// A statically declared parameter slot.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct ParamSpec {
    pub name: &'static str,
    pub ty: ParamType,
    pub fallback: Fallback,
}

impl ParamSpec {
    const fn required(name: &'static str, ty: ParamType) -> Self {
        ParamSpec {
            name,
            ty,
            fallback: Fallback::Required,
        }
    }

    const fn optional(name: &'static str, ty: ParamType, fallback: Fallback) -> Self {
        ParamSpec { name, ty, fallback }
    }
}

/// What a piece produces when evaluated.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Output {
    /// Effects, controls, modifiers: nothing another piece may read.
    Nothing,
    /// A value of a fixed type.
    Value(ValueType),
    /// Whatever the single input produces.
    Forward,
}

/// Every piece kind the compiler knows about.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum PieceKind {
    // Selectors
    Caster,
    FocalPoint,
    AttackedEntity,
    /// Whoever struck the caster, when the cast was triggered by a hit.
    Attacker,
    DamageTaken,
    LoopIndex,

    // Constants
    Number(Literal),

    // Operators
    Sum,
    Multiply,
    VectorConstruct,
    VectorSum,
    VectorScale,
    EntityPosition,

    Connector,

    // Modifiers
    ErrorSuppressor,

    // Tricks
    Debug,
    Ignite,
    AddMotion,
    Explode,
    BreakBlock,
    PlaceBlock,
    Delay,
    Die,

    // Control flow
    Repeat,
    Branch,
}

/// The piece registry: identifier to kind.
///
/// `constant_number` maps to a zero literal; callers set the value afterwards.
const REGISTRY: &[(&str, PieceKind)] = &[
    ("selector_caster", PieceKind::Caster),
    ("selector_focal_point", PieceKind::FocalPoint),
    ("selector_attacked_entity", PieceKind::AttackedEntity),
    ("selector_attacker", PieceKind::Attacker),
    ("selector_damage_taken", PieceKind::DamageTaken),
    ("selector_loop_index", PieceKind::LoopIndex),
    ("constant_number", PieceKind::Number(Literal::ZERO)),
    ("operator_sum", PieceKind::Sum),
    ("operator_multiply", PieceKind::Multiply),
    ("operator_vector_construct", PieceKind::VectorConstruct),
    ("operator_vector_sum", PieceKind::VectorSum),
    ("operator_vector_scale", PieceKind::VectorScale),
    ("operator_entity_position", PieceKind::EntityPosition),
    ("connector", PieceKind::Connector),
    ("error_suppressor", PieceKind::ErrorSuppressor),
    ("trick_debug", PieceKind::Debug),
    ("trick_ignite", PieceKind::Ignite),
    ("trick_add_motion", PieceKind::AddMotion),
    ("trick_explode", PieceKind::Explode),
    ("trick_break_block", PieceKind::BreakBlock),
    ("trick_place_block", PieceKind::PlaceBlock),
    ("trick_delay", PieceKind::Delay),
    ("trick_die", PieceKind::Die),
    ("control_repeat", PieceKind::Repeat),
    ("control_branch", PieceKind::Branch),
];

/// Look up a piece kind by registry identifier.
pub fn lookup_piece(id: &str) -> Option<PieceKind> {
    REGISTRY
        .iter()
        .find(|(name, _)| *name == id)
        .map(|(_, kind)| *kind)
}

const NUMBER_PAIR: &[ParamSpec] = &[
    ParamSpec::required(param::A, ParamType::Number),
    ParamSpec::required(param::B, ParamType::Number),
];

const VECTOR_PAIR: &[ParamSpec] = &[
    ParamSpec::required(param::A, ParamType::Vector),
    ParamSpec::required(param::B, ParamType::Vector),
];

const VECTOR_CONSTRUCT: &[ParamSpec] = &[
    ParamSpec::optional(param::X, ParamType::Number, Fallback::Number(0.0)),
    ParamSpec::optional(param::Y, ParamType::Number, Fallback::Number(0.0)),
    ParamSpec::optional(param::Z, ParamType::Number, Fallback::Number(0.0)),
];

const VECTOR_SCALE: &[ParamSpec] = &[
    ParamSpec::required(param::VECTOR, ParamType::Vector),
    ParamSpec::required(param::FACTOR, ParamType::Number),
];

const ENTITY_TARGET: &[ParamSpec] = &[ParamSpec::required(param::TARGET, ParamType::Entity)];

const CONNECTOR: &[ParamSpec] = &[ParamSpec::required(param::TARGET, ParamType::Any)];

const DEBUG: &[ParamSpec] = &[
    ParamSpec::required(param::TARGET, ParamType::Any),
    ParamSpec::optional(param::NUMBER, ParamType::Number, Fallback::Null),
];

const IGNITE: &[ParamSpec] = &[
    ParamSpec::required(param::TARGET, ParamType::Entity),
    ParamSpec::required(param::TIME, ParamType::Number),
];

const ADD_MOTION: &[ParamSpec] = &[
    ParamSpec::required(param::TARGET, ParamType::Entity),
    ParamSpec::required(param::DIRECTION, ParamType::Vector),
    ParamSpec::optional(param::SPEED, ParamType::Number, Fallback::Number(1.0)),
];

const EXPLODE: &[ParamSpec] = &[
    ParamSpec::required(param::POSITION, ParamType::Vector),
    ParamSpec::required(param::POWER, ParamType::Number),
];

const POSITION: &[ParamSpec] = &[ParamSpec::required(param::POSITION, ParamType::Vector)];

const DELAY: &[ParamSpec] = &[ParamSpec::required(param::TIME, ParamType::Number)];

const DIE: &[ParamSpec] = &[ParamSpec::required(param::CONDITION, ParamType::Number)];

const REPEAT: &[ParamSpec] = &[
    ParamSpec::required(param::COUNT, ParamType::Number),
    ParamSpec::required(param::BODY, ParamType::Action),
];

const BRANCH: &[ParamSpec] = &[
    ParamSpec::required(param::CONDITION, ParamType::Number),
    ParamSpec::required(param::THEN, ParamType::Action),
    ParamSpec::optional(param::OTHERWISE, ParamType::Action, Fallback::NoAction),
];

impl PieceKind {
    /// Registry identifier.
    pub fn id(self) -> &'static str {
        match self {
            PieceKind::Caster => "selector_caster",
            PieceKind::FocalPoint => "selector_focal_point",
            PieceKind::AttackedEntity => "selector_attacked_entity",
            PieceKind::Attacker => "selector_attacker",
            PieceKind::DamageTaken => "selector_damage_taken",
            PieceKind::LoopIndex => "selector_loop_index",
            PieceKind::Number(_) => "constant_number",
            PieceKind::Sum => "operator_sum",
            PieceKind::Multiply => "operator_multiply",
            PieceKind::VectorConstruct => "operator_vector_construct",
            PieceKind::VectorSum => "operator_vector_sum",
            PieceKind::VectorScale => "operator_vector_scale",
            PieceKind::EntityPosition => "operator_entity_position",
            PieceKind::Connector => "connector",
            PieceKind::ErrorSuppressor => "error_suppressor",
            PieceKind::Debug => "trick_debug",
            PieceKind::Ignite => "trick_ignite",
            PieceKind::AddMotion => "trick_add_motion",
            PieceKind::Explode => "trick_explode",
            PieceKind::BreakBlock => "trick_break_block",
            PieceKind::PlaceBlock => "trick_place_block",
            PieceKind::Delay => "trick_delay",
            PieceKind::Die => "trick_die",
            PieceKind::Repeat => "control_repeat",
            PieceKind::Branch => "control_branch",
        }
    }

    pub fn category(self) -> PieceCategory {
        match self {
            PieceKind::Caster
            | PieceKind::FocalPoint
            | PieceKind::AttackedEntity
            | PieceKind::Attacker
            | PieceKind::DamageTaken
            | PieceKind::LoopIndex => PieceCategory::Selector,
            PieceKind::Number(_) => PieceCategory::Constant,
            PieceKind::Sum
            | PieceKind::Multiply
            | PieceKind::VectorConstruct
            | PieceKind::VectorSum
            | PieceKind::VectorScale
            | PieceKind::EntityPosition => PieceCategory::Operator,
            PieceKind::Connector => PieceCategory::Connector,
            PieceKind::ErrorSuppressor => PieceCategory::Modifier,
            PieceKind::Debug
            | PieceKind::Ignite
            | PieceKind::AddMotion
            | PieceKind::Explode
            | PieceKind::BreakBlock
            | PieceKind::PlaceBlock
            | PieceKind::Delay
            | PieceKind::Die => PieceCategory::Trick,
            PieceKind::Repeat | PieceKind::Branch => PieceCategory::Control,
        }
    }

    /// Parameter slots, in declaration order.
    pub fn params(self) -> &'static [ParamSpec] {
        match self {
            PieceKind::Caster
            | PieceKind::FocalPoint
            | PieceKind::AttackedEntity
            | PieceKind::Attacker
            | PieceKind::DamageTaken
            | PieceKind::LoopIndex
            | PieceKind::Number(_)
            | PieceKind::ErrorSuppressor => &[],
            PieceKind::Sum | PieceKind::Multiply => NUMBER_PAIR,
            PieceKind::VectorConstruct => VECTOR_CONSTRUCT,
            PieceKind::VectorSum => VECTOR_PAIR,
            PieceKind::VectorScale => VECTOR_SCALE,
            PieceKind::EntityPosition => ENTITY_TARGET,
            PieceKind::Connector => CONNECTOR,
            PieceKind::Debug => DEBUG,
            PieceKind::Ignite => IGNITE,
            PieceKind::AddMotion => ADD_MOTION,
            PieceKind::Explode => EXPLODE,
            PieceKind::BreakBlock | PieceKind::PlaceBlock => POSITION,
            PieceKind::Delay => DELAY,
            PieceKind::Die => DIE,
            PieceKind::Repeat => REPEAT,
            PieceKind::Branch => BRANCH,
        }
    }

    /// Index of the slot called `name`.
    pub fn param_index(self, name: &str) -> Option<usize> {
        self.params().iter().position(|p| p.name == name)
    }

    pub fn output(self) -> Output {
        match self {
            PieceKind::Caster
            | PieceKind::FocalPoint
            | PieceKind::AttackedEntity
            | PieceKind::Attacker => Output::Value(ValueType::Entity),
            PieceKind::DamageTaken
            | PieceKind::LoopIndex
            | PieceKind::Number(_)
            | PieceKind::Sum
            | PieceKind::Multiply => Output::Value(ValueType::Number),
            PieceKind::VectorConstruct
            | PieceKind::VectorSum
            | PieceKind::VectorScale
            | PieceKind::EntityPosition => Output::Value(ValueType::Vector),
            PieceKind::Connector => Output::Forward,
            PieceKind::ErrorSuppressor
            | PieceKind::Debug
            | PieceKind::Ignite
            | PieceKind::AddMotion
            | PieceKind::Explode
            | PieceKind::BreakBlock
            | PieceKind::PlaceBlock
            | PieceKind::Delay
            | PieceKind::Die
            | PieceKind::Repeat
            | PieceKind::Branch => Output::Nothing,
        }
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PieceKind::Number(lit) => write!(f, "{}({})", self.id(), lit.get()),
            _ => f.write_str(self.id()),
        }
    }
}

/// Error from binding a parameter name the piece kind does not declare.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownParam {
    pub kind: &'static str,
    pub name: String,
}

impl fmt::Display for UnknownParam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "`{}` has no parameter named `{}`", self.kind, self.name)
    }
}

impl std::error::Error for UnknownParam {}

/// A piece placed on the grid: a kind plus the side bound to each slot.
///
/// `sides` always has exactly one entry per declared slot.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Piece {
    kind: PieceKind,
    sides: SmallVec<[Side; MAX_PARAMS]>,
}

impl Piece {
    /// A piece with every slot disconnected.
    pub fn new(kind: PieceKind) -> Self {
        Piece {
            kind,
            sides: kind.params().iter().map(|_| Side::Off).collect(),
        }
    }

    /// A constant number piece.
    pub fn number(value: f64) -> Self {
        Piece::new(PieceKind::Number(Literal::new(value)))
    }

    #[inline]
    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    /// Bind slot `name` to `side`.
    pub fn set_param(&mut self, name: &str, side: Side) -> Result<(), UnknownParam> {
        let index = self.kind.param_index(name).ok_or_else(|| UnknownParam {
            kind: self.kind.id(),
            name: name.to_owned(),
        })?;
        self.sides[index] = side;
        Ok(())
    }

    /// Builder form of [`Piece::set_param`].
    pub fn with_param(mut self, name: &str, side: Side) -> Result<Self, UnknownParam> {
        self.set_param(name, side)?;
        Ok(self)
    }

    /// Side bound to slot `index`, `None` if the kind has no such slot.
    pub fn side(&self, index: usize) -> Option<Side> {
        self.sides.get(index).copied()
    }

    /// Slots paired with their bound sides, in declaration order.
    pub fn slots(&self) -> impl Iterator<Item = (&'static ParamSpec, Side)> + '_ {
        self.kind.params().iter().zip(self.sides.iter().copied())
    }
}

#[cfg(test)]
mod tests;
