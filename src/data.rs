//!
//! # BookShelf Data Model
//!
//!

// Std-Lib
use std::collections::HashMap;
use std::path::{Path, PathBuf};

// Crates.io Imports
use derive_builder::Builder;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

///
/// # BsDecimal
///
/// Internal type alias for all decimal-valued data.
/// Uses [rust_decimal](https://crates.io/crates/rust_decimal) internally.
///
pub type BsDecimal = rust_decimal::Decimal;

/// # BookShelf Node
///
/// One logic cell or pad from a `.nodes` file.
/// Geometry is integer-valued; `terminal` nodes are fixed I/O pads
/// which placement never relocates.
#[derive(Default, Clone, Debug, Deserialize, Serialize, JsonSchema, PartialEq, Eq)]
pub struct BsNode {
    /// Node Name
    pub name: String,
    /// Width
    pub width: i32,
    /// Height
    pub height: i32,
    /// Terminal (I/O Pad) Indication
    pub terminal: bool,
}
/// # BookShelf Placement Record
///
/// One node's location from a `.pl` file.
/// Coordinates are the node's *origin* (lower-left), not its center.
#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema, PartialEq, Eq)]
pub struct BsPlacement {
    /// Placed Node Name
    pub name: String,
    /// X Origin Coordinate
    pub x: i64,
    /// Y Origin Coordinate
    pub y: i64,
    /// Orientation
    /// The format writes N, S, E, W, FN, FS, FE, FW; only the uppercased
    /// leading character is retained.
    pub orient: char,
    /// Fixed-Location Indication
    pub fixed: bool,
}
impl Default for BsPlacement {
    fn default() -> Self {
        Self {
            name: String::new(),
            x: 0,
            y: 0,
            orient: 'N',
            fixed: false,
        }
    }
}
/// # BookShelf Pin Direction
#[derive(Clone, Copy, Debug, Deserialize, Serialize, JsonSchema, PartialEq, Eq)]
pub enum BsPinDirection {
    Input,
    Output,
    Bidir,
    Unknown,
}
impl BsPinDirection {
    /// Direction from a pin record's direction token, via its uppercased
    /// leading character. Anything outside {I, O, B} is [BsPinDirection::Unknown].
    pub fn from_char(c: char) -> Self {
        match c.to_ascii_uppercase() {
            'I' => Self::Input,
            'O' => Self::Output,
            'B' => Self::Bidir,
            _ => Self::Unknown,
        }
    }
}
impl Default for BsPinDirection {
    fn default() -> Self {
        Self::Unknown
    }
}
impl std::fmt::Display for BsPinDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let s = match self {
            Self::Input => "I",
            Self::Output => "O",
            Self::Bidir => "B",
            Self::Unknown => "U",
        };
        write!(f, "{}", s)
    }
}
/// # BookShelf Net Pin
///
/// One connection point of a net.
/// `node_name` is a lookup key into the design's node map, not an ownership
/// relation; it may reference a node the `.nodes` file never declared.
/// Offsets are relative to the referenced node's origin.
#[derive(Default, Clone, Debug, Deserialize, Serialize, JsonSchema, PartialEq, Eq)]
pub struct BsPin {
    /// Referenced Node Name
    pub node_name: String,
    /// Direction
    pub direction: BsPinDirection,
    /// X Offset from the node origin
    pub x_offset: BsDecimal,
    /// Y Offset from the node origin
    pub y_offset: BsDecimal,
}
/// # BookShelf Net
///
/// A named net and its pins, in declaration order.
#[derive(Default, Clone, Builder, Debug, Deserialize, Serialize, JsonSchema, PartialEq, Eq)]
#[builder(pattern = "owned", setter(into), default)]
pub struct BsNet {
    /// Net Name
    pub name: String,
    /// Pin List
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub pins: Vec<BsPin>,
}
/// # BookShelf Core Row
///
/// One horizontal placement row's site geometry from a `.scl` file's
/// `CoreRow` ... `End` block. A row is only materialized when its block
/// is properly closed.
#[derive(Default, Clone, Builder, Debug, Deserialize, Serialize, JsonSchema, PartialEq, Eq)]
#[builder(pattern = "owned", setter(into), default)]
pub struct BsCoreRow {
    /// Y Coordinate of the row's lower edge
    pub coordinate: i32,
    /// Row Height
    pub height: i32,
    /// Site Width
    pub site_width: i32,
    /// Site Spacing
    pub site_spacing: i32,
    /// Site Orientation
    pub site_orient: i32,
    /// Site Symmetry
    pub site_symmetry: i32,
    /// X Coordinate of the leftmost placeable site
    pub subrow_origin: i64,
    /// Number of sites in the row's contiguous span
    pub num_sites: i64,
}
/// # BookShelf Row Layout
///
/// The `.scl` file's content: the declared row count plus each parsed
/// `CoreRow` block, in file order. `num_rows` is advisory; the format
/// allows it to disagree with the number of blocks actually present.
#[derive(Default, Clone, Debug, Deserialize, Serialize, JsonSchema, PartialEq, Eq)]
pub struct BsRowLayout {
    /// Declared Row Count
    pub num_rows: i32,
    /// Parsed Rows
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rows: Vec<BsCoreRow>,
}
/// # BookShelf Design
///
/// The aggregate of one benchmark's five input files, keyed by their shared
/// basename. Node and placement maps are last-write-wins on duplicate
/// names; nets keep declaration order. All content is immutable once
/// parsed.
#[derive(Default, Clone, Builder, Debug, Deserialize, Serialize, JsonSchema, PartialEq, Eq)]
#[builder(pattern = "owned", setter(into), default)]
pub struct BsDesign {
    /// Shared Basename of the constituent files
    pub basename: String,
    /// Nodes, from `<basename>.nodes`
    pub nodes: HashMap<String, BsNode>,
    /// Placements, from `<basename>.pl`
    pub placements: HashMap<String, BsPlacement>,
    /// Nets, from `<basename>.nets`
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub nets: Vec<BsNet>,
    /// Row Layout, from `<basename>.scl`
    pub scl: BsRowLayout,
    /// Net Weights, from the optional `<basename>.wts`
    pub weights: HashMap<String, BsDecimal>,
}
impl BsDesign {
    /// Parse a [BsDesign] from the five `<dir>/<basename>.*` files.
    pub fn open(dir: impl AsRef<Path>, basename: &str) -> BsResult<BsDesign> {
        crate::read::parse_design(dir, basename)
    }
    /// Render the design's summary report to a [String].
    pub fn report(&self) -> BsResult<String> {
        crate::report::to_string(self)
    }
    /// Write the design's summary report to file `fname`.
    pub fn save_report(&self, fname: impl AsRef<Path>) -> BsResult<()> {
        crate::report::save(self, fname)
    }
    /// A net's weight. Nets without an explicit `.wts` entry weigh 1.0.
    pub fn net_weight(&self, name: &str) -> BsDecimal {
        self.weights.get(name).copied().unwrap_or(BsDecimal::ONE)
    }
}

/// # BookShelf Key(Word)s
///
/// The keywords recognized across the format family.
/// BookShelf matches these case-sensitively (`Sitewidth`, not `SITEWIDTH`),
/// so unlike most layout formats both directions of the string mapping are
/// exact-text.
#[derive(Clone, Copy, Debug, Deserialize, Serialize, JsonSchema, PartialEq, Eq)]
pub enum BsKey {
    NumNodes,
    NumTerminals,
    NumNets,
    NumPins,
    NumRows,
    NetDegree,
    CoreRow,
    End,
    Coordinate,
    Height,
    Sitewidth,
    Sitespacing,
    Siteorient,
    Sitesymmetry,
    SubrowOrigin,
    NumSites,
}
impl BsKey {
    /// The count-header keywords which open each file's preamble.
    /// Their lines carry totals the parsers re-derive, so the line scanner
    /// drops them unless a parser asks otherwise.
    pub const COUNT_HEADERS: [BsKey; 5] = [
        BsKey::NumNodes,
        BsKey::NumTerminals,
        BsKey::NumNets,
        BsKey::NumPins,
        BsKey::NumRows,
    ];
    /// Keyword to its format string
    pub fn to_str(&self) -> &'static str {
        match self {
            Self::NumNodes => "NumNodes",
            Self::NumTerminals => "NumTerminals",
            Self::NumNets => "NumNets",
            Self::NumPins => "NumPins",
            Self::NumRows => "NumRows",
            Self::NetDegree => "NetDegree",
            Self::CoreRow => "CoreRow",
            Self::End => "End",
            Self::Coordinate => "Coordinate",
            Self::Height => "Height",
            Self::Sitewidth => "Sitewidth",
            Self::Sitespacing => "Sitespacing",
            Self::Siteorient => "Siteorient",
            Self::Sitesymmetry => "Sitesymmetry",
            Self::SubrowOrigin => "SubrowOrigin",
            Self::NumSites => "NumSites",
        }
    }
    /// Exact-text keyword lookup
    pub fn from_str(txt: &str) -> Option<Self> {
        let key = match txt {
            "NumNodes" => Self::NumNodes,
            "NumTerminals" => Self::NumTerminals,
            "NumNets" => Self::NumNets,
            "NumPins" => Self::NumPins,
            "NumRows" => Self::NumRows,
            "NetDegree" => Self::NetDegree,
            "CoreRow" => Self::CoreRow,
            "End" => Self::End,
            "Coordinate" => Self::Coordinate,
            "Height" => Self::Height,
            "Sitewidth" => Self::Sitewidth,
            "Sitespacing" => Self::Sitespacing,
            "Siteorient" => Self::Siteorient,
            "Sitesymmetry" => Self::Sitesymmetry,
            "SubrowOrigin" => Self::SubrowOrigin,
            "NumSites" => Self::NumSites,
            _ => return None,
        };
        Some(key)
    }
}
impl std::fmt::Display for BsKey {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

/// # BookShelf Error Enumeration
#[derive(Debug)]
pub enum BsError {
    /// Required input file cannot be opened.
    /// Only the four required suffixes raise this; a missing `.wts` yields
    /// an empty weight map instead.
    Io {
        path: PathBuf,
        err: std::io::Error,
    },
    /// Structurally load-bearing field failed to parse
    Parse {
        file: PathBuf,
        line: usize,
        field: &'static str,
    },
    /// Wrapped errors, generally from other crates
    Boxed(Box<dyn std::error::Error>),
    /// String message-valued errors
    Str(String),
}
impl From<std::io::Error> for BsError {
    fn from(e: std::io::Error) -> Self {
        Self::Boxed(Box::new(e))
    }
}
impl From<String> for BsError {
    /// Convert string-based errors by wrapping them
    fn from(e: String) -> Self {
        Self::Str(e)
    }
}
impl From<&str> for BsError {
    /// Convert string-based errors by wrapping them
    fn from(e: &str) -> Self {
        Self::Str(e.into())
    }
}
impl std::fmt::Display for BsError {
    /// Delegates to the [Debug] implementation
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> Result<(), std::fmt::Error> {
        std::fmt::Debug::fmt(self, f)
    }
}
impl std::error::Error for BsError {}

/// BookShelf21 Library-Wide Result Type
pub type BsResult<T> = Result<T, BsError>;
