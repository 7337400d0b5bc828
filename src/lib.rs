//!
//! # BookShelf21 Placement-Benchmark Parser & Summarizer
//!
//! BookShelf is the academic placement community's de facto standard for
//! sharing VLSI placement benchmarks: a family of plain-text files
//! (`.nodes`, `.pl`, `.nets`, `.scl`, and optionally `.wts`) sharing one
//! basename, together describing a netlist, its geometry, and its
//! placement-row layout. BookShelf21 reads a benchmark into an in-memory
//! [BsDesign] and derives the statistics summary (areas, density, and the
//! net-degree histogram) that placement tools print when loading one.
//! Reading the formats and deriving the summary are the goals; placing,
//! legalizing, or writing the formats back out are not.
//!
//! Design content is represented as a flat aggregate:
//!
//! * A [BsDesign] pairs the five files' content under their shared
//!   basename: name-keyed [BsNode] and [BsPlacement] maps, the ordered
//!   [BsNet] list (each a sequence of [BsPin]s), the [BsRowLayout] of
//!   [BsCoreRow]s, and the net-weight map.
//! * Node and placement maps are last-write-wins on duplicate names, and a
//!   pin's node reference is a lookup key rather than an ownership
//!   relation; it may name a node the benchmark never declares.
//! * Everything is immutable once parsed. Statistics ([BsStats]) are a
//!   pure derivation over a parsed design.
//!
//! ## Usage
//!
//! Loading a [BsDesign] from a benchmark directory:
//!
//! ```skip
//! let design = bookshelf21::parse_design("benchmarks/adaptec1", "adaptec1")?;
//! ```
//!
//! Deriving its statistics and summary report:
//!
//! ```skip
//! let stats = design.stats();
//! print!("{}", design.report()?);
//! ```
//!
//! Each element of the design tree is [serde]-serializable, with JSON and
//! YAML dependencies included for alternate serialization of parsed
//! designs.
//!

#[macro_use]
extern crate fstrings;

// Internal modules & re-exports
pub mod data;
pub mod read;
pub mod report;
pub use data::*;
pub use read::parse_design;
pub use report::{BsBBox, BsDegreeHistogram, BsStats};
