use std::fmt;

/// Error codes for all spell diagnostics.
///
/// Format: E#### where first digit indicates phase:
/// - E0xxx: Compile errors (fatal to one compilation attempt)
/// - E1xxx: Runtime errors (fatal to one cast)
/// - E9xxx: Tooling errors (grid files, command line)
/// - W####: Warnings (the spell still compiles)
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    // Compile Errors (E0xxx)
    /// Spell has no tricks
    E0001,
    /// Required parameter not connected
    E0002,
    /// Parameter connected to an empty cell
    E0003,
    /// Parameter connected to a piece of the wrong type
    E0004,
    /// Two parameters of one piece bound to the same side
    E0005,
    /// Cyclic parameter dependency
    E0006,
    /// Value must be a positive integer
    E0007,
    /// Value must be positive
    E0008,
    /// Stat accumulator overflowed
    E0009,
    /// Complexity budget exceeded
    E0010,
    /// Control slot does not point at a trick
    E0011,
    /// Trick is the body of more than one control piece
    E0012,
    /// Repeat count above the configured limit
    E0013,

    // Runtime Errors (E1xxx)
    /// Null target
    E1001,
    /// Target immune to spells
    E1002,
    /// Caster has no casting equipment
    E1003,
    /// Tool lacks a required capability
    E1004,
    /// Target outside the spell radius
    E1005,
    /// Zero-length vector where a direction is required
    E1006,
    /// Value of an unexpected type reached a piece
    E1007,

    // Tooling Errors (E9xxx)
    /// Invalid grid file
    E9001,

    // Warnings (Wxxxx)
    /// Value piece whose output is never read
    W0001,
}

impl ErrorCode {
    /// Check if this is a compile error (E0xxx range).
    pub fn is_compile_error(&self) -> bool {
        self.as_str().starts_with("E0")
    }

    /// Check if this is a runtime error (E1xxx range).
    pub fn is_runtime_error(&self) -> bool {
        self.as_str().starts_with("E1")
    }

    /// Get the numeric code as a string (e.g., "E0007").
    pub fn as_str(&self) -> &'static str {
        match self {
            // Compile
            ErrorCode::E0001 => "E0001",
            ErrorCode::E0002 => "E0002",
            ErrorCode::E0003 => "E0003",
            ErrorCode::E0004 => "E0004",
            ErrorCode::E0005 => "E0005",
            ErrorCode::E0006 => "E0006",
            ErrorCode::E0007 => "E0007",
            ErrorCode::E0008 => "E0008",
            ErrorCode::E0009 => "E0009",
            ErrorCode::E0010 => "E0010",
            ErrorCode::E0011 => "E0011",
            ErrorCode::E0012 => "E0012",
            ErrorCode::E0013 => "E0013",
            // Runtime
            ErrorCode::E1001 => "E1001",
            ErrorCode::E1002 => "E1002",
            ErrorCode::E1003 => "E1003",
            ErrorCode::E1004 => "E1004",
            ErrorCode::E1005 => "E1005",
            ErrorCode::E1006 => "E1006",
            ErrorCode::E1007 => "E1007",
            // Tooling
            ErrorCode::E9001 => "E9001",
            // Warnings
            ErrorCode::W0001 => "W0001",
        }
    }

    /// Parse a code such as `"E0007"` (case-insensitive).
    pub fn parse(code: &str) -> Option<ErrorCode> {
        ErrorCode::ALL
            .iter()
            .copied()
            .find(|c| c.as_str().eq_ignore_ascii_case(code))
    }

    /// Every known code, in numeric order.
    pub const ALL: &'static [ErrorCode] = &[
        ErrorCode::E0001,
        ErrorCode::E0002,
        ErrorCode::E0003,
        ErrorCode::E0004,
        ErrorCode::E0005,
        ErrorCode::E0006,
        ErrorCode::E0007,
        ErrorCode::E0008,
        ErrorCode::E0009,
        ErrorCode::E0010,
        ErrorCode::E0011,
        ErrorCode::E0012,
        ErrorCode::E0013,
        ErrorCode::E1001,
        ErrorCode::E1002,
        ErrorCode::E1003,
        ErrorCode::E1004,
        ErrorCode::E1005,
        ErrorCode::E1006,
        ErrorCode::E1007,
        ErrorCode::E9001,
        ErrorCode::W0001,
    ];
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
