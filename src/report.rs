//!
//! # BookShelf Report Module
//!
//! The statistics engine over a parsed [BsDesign], and the writer rendering
//! its placement-summary report. Statistics are a pure derivation; nothing
//! here mutates the design.
//!

// Standard Lib Imports
use std::io::Write;
use std::path::Path;

// Crates.io Imports
use derive_more::{Add, AddAssign, Sub, SubAssign};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

// Local imports
use super::data::*;

/// Write `design`'s summary report to file `fname`.
pub fn save(design: &BsDesign, fname: impl AsRef<Path>) -> BsResult<()> {
    let f = std::fs::File::create(fname)?;
    ReportWriter::new(f).write_report(design)
}
/// Render `design`'s summary report to a [String].
pub fn to_string(design: &BsDesign) -> BsResult<String> {
    let mut buf = Vec::new();
    ReportWriter::new(&mut buf).write_report(design)?;
    let rv = std::str::from_utf8(buf.as_slice()).unwrap().to_string();
    Ok(rv)
}

/// # Net-Degree Histogram
///
/// Net counts by pin-count bucket. Degrees zero and one land in no bucket.
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    Deserialize,
    Serialize,
    JsonSchema,
    PartialEq,
    Eq,
    Add,
    AddAssign,
    Sub,
    SubAssign,
)]
pub struct BsDegreeHistogram {
    /// Degree exactly 2
    pub two: usize,
    /// Degrees 3 through 10
    pub three_to_ten: usize,
    /// Degrees 11 through 100
    pub eleven_to_hundred: usize,
    /// Degrees above 100
    pub over_hundred: usize,
}
impl BsDegreeHistogram {
    /// Count one net of pin-count `degree`
    pub fn count(&mut self, degree: usize) {
        match degree {
            2 => self.two += 1,
            3..=10 => self.three_to_ten += 1,
            11..=100 => self.eleven_to_hundred += 1,
            d if d > 100 => self.over_hundred += 1,
            _ => (),
        }
    }
}

/// # Core Bounding Box
///
/// The bounding rectangle of all placement rows, in row/site coordinates.
/// Upper bounds are exclusive for containment tests. With zero rows the
/// box degenerates to `(0,0,0,0)`.
#[derive(
    Debug, Default, Clone, Copy, Deserialize, Serialize, JsonSchema, PartialEq, Eq,
)]
pub struct BsBBox {
    pub min_x: i64,
    pub min_y: i64,
    pub max_x: i64,
    pub max_y: i64,
}
impl BsBBox {
    /// The bounding box over row set `rows`.
    /// Each row spans from its subrow origin across `num_sites` sites of
    /// `site_width` (minimum one) horizontally, and from its coordinate up
    /// its height vertically.
    pub fn of_rows(rows: &[BsCoreRow]) -> Self {
        if rows.is_empty() {
            return Self::default();
        }
        let mut bbox = Self {
            min_x: i64::MAX,
            min_y: i64::MAX,
            max_x: i64::MIN,
            max_y: i64::MIN,
        };
        for row in rows.iter() {
            let row_max_x = row.subrow_origin + row.num_sites * i64::from(row.site_width.max(1));
            bbox.min_x = bbox.min_x.min(row.subrow_origin);
            bbox.max_x = bbox.max_x.max(row_max_x);
            bbox.min_y = bbox.min_y.min(i64::from(row.coordinate));
            bbox.max_y = bbox.max_y.max(i64::from(row.coordinate) + i64::from(row.height));
        }
        bbox
    }
    /// Width, clamped non-negative
    pub fn width(&self) -> i64 {
        (self.max_x - self.min_x).max(0)
    }
    /// Height, clamped non-negative
    pub fn height(&self) -> i64 {
        (self.max_y - self.min_y).max(0)
    }
    /// Containment of origin point `(x, y)`, half-open on the upper bounds
    pub fn contains(&self, x: i64, y: i64) -> bool {
        x >= self.min_x && x < self.max_x && y >= self.min_y && y < self.max_y
    }
}

/// # BookShelf Summary Stats
///
/// Aggregate statistics for a [BsDesign]: entity counts, the core region
/// and its areas, density/utilization ratios, and the net-degree
/// histogram. The two trailing fields are cross-file consistency
/// diagnostics; tolerated conditions tallied but never raised as errors.
#[derive(Debug, Default, Clone, Deserialize, Serialize, JsonSchema, PartialEq)]
pub struct BsStats {
    /// All nodes, terminals included
    pub num_modules: usize,
    /// Non-terminal (movable) nodes
    pub num_nodes: usize,
    /// Terminal nodes
    pub terminals: usize,
    /// Nets
    pub net_count: usize,
    /// Pins across all nets
    pub pin_count: usize,
    /// Largest per-net pin count
    pub max_degree: usize,
    /// Nets by degree bucket
    pub degrees: BsDegreeHistogram,
    /// Core region bounding box
    pub core: BsBBox,
    /// First parsed row's height
    pub row_height: i32,
    /// First parsed row's site step (site width, minimum one)
    pub site_step: i32,
    /// Count of parsed `CoreRow` blocks
    pub rows_parsed: usize,
    /// Core region area
    pub core_area: i64,
    /// Reported cell area (equals the movable area)
    pub cell_area: i64,
    /// Total area of non-fixed nodes
    pub movable_area: i64,
    /// Total area of fixed nodes (terminal, or placed FIXED)
    pub fixed_area: i64,
    /// Fixed area whose placement origin falls within the core
    pub fixed_in_core_area: i64,
    /// Core area not occupied by in-core fixed nodes
    pub free_sites_area: i64,
    /// Movable area over free sites area, as a percentage
    pub placement_util: f64,
    /// Used (movable + in-core fixed) area over core area, as a percentage
    pub core_density: f64,
    /// Nodes with no placement record
    pub missing_placements: usize,
    /// Pins referencing nodes the `.nodes` file never declared
    pub dangling_pins: usize,
}

impl BsDesign {
    /// Collect and return the design's aggregate statistics.
    pub fn stats(&self) -> BsStats {
        let mut stats = BsStats::default();

        // Entity counts and the degree histogram
        stats.num_modules = self.nodes.len();
        stats.terminals = self.nodes.values().filter(|n| n.terminal).count();
        stats.num_nodes = stats.num_modules - stats.terminals;
        stats.net_count = self.nets.len();
        for net in self.nets.iter() {
            let degree = net.pins.len();
            stats.pin_count += degree;
            stats.max_degree = stats.max_degree.max(degree);
            stats.degrees.count(degree);
            for pin in net.pins.iter() {
                if !self.nodes.contains_key(&pin.node_name) {
                    stats.dangling_pins += 1;
                }
            }
        }

        // Core region, from the row layout
        stats.core = BsBBox::of_rows(&self.scl.rows);
        stats.core_area = stats.core.width() * stats.core.height();
        if let Some(first) = self.scl.rows.first() {
            stats.row_height = first.height;
            stats.site_step = first.site_width.max(1);
        }
        stats.rows_parsed = self.scl.rows.len();

        // Area classification. A node is fixed if it is a terminal or its
        // placement record says so; in-core membership tests the placement
        // origin against the half-open core box.
        for node in self.nodes.values() {
            let area = i64::from(node.width) * i64::from(node.height);
            let placement = self.placements.get(&node.name);
            if placement.is_none() {
                stats.missing_placements += 1;
            }
            let fixed = node.terminal || placement.map(|p| p.fixed).unwrap_or(false);
            if fixed {
                stats.fixed_area += area;
                if let Some(p) = placement {
                    if stats.core.contains(p.x, p.y) {
                        stats.fixed_in_core_area += area;
                    }
                }
            } else {
                stats.movable_area += area;
            }
        }
        stats.cell_area = stats.movable_area;

        // Ratios
        stats.free_sites_area = (stats.core_area - stats.fixed_in_core_area).max(0);
        stats.placement_util = pct(stats.movable_area, stats.free_sites_area);
        stats.core_density = pct(
            stats.movable_area + stats.fixed_in_core_area,
            stats.core_area,
        );
        stats
    }
}

/// Percentage of `num` over `den`, zero for non-positive denominators
fn pct(num: i64, den: i64) -> f64 {
    if den <= 0 {
        return 0.0;
    }
    100.0 * num as f64 / den as f64
}

/// C-style uppercase scientific notation: six fractional digits, explicit
/// exponent sign, two-digit exponent. Placement tools print their area
/// figures this way, e.g. `1.715760E+13`.
fn format_sci(val: i64) -> String {
    if val == 0 {
        return "0.000000E+00".to_string();
    }
    let neg = val < 0;
    let mut mantissa = (val as f64).abs();
    let mut exp = 0i32;
    while mantissa >= 10.0 {
        mantissa /= 10.0;
        exp += 1;
    }
    // Rounding at six fractional digits can carry into a second integer digit
    if format!("{:.6}", mantissa).starts_with("10") {
        mantissa /= 10.0;
        exp += 1;
    }
    let sign = if neg { "-" } else { "" };
    let esign = if exp < 0 { "-" } else { "+" };
    format!("{}{:.6}E{}{:02}", sign, mantissa, esign, exp.abs())
}

/// # Report Writing Helper
struct ReportWriter<'wr> {
    /// Write Destination
    dest: Box<dyn Write + 'wr>,
}
impl<'wr> ReportWriter<'wr> {
    /// Create a new [ReportWriter] to destination `dest`.
    /// Destination is boxed internally.
    fn new(dest: impl Write + 'wr) -> Self {
        Self {
            dest: Box::new(dest),
        }
    }
    /// Write `design`'s summary report to the destination.
    /// Lines are written in the summary's fixed order.
    fn write_report(&mut self, design: &BsDesign) -> BsResult<()> {
        let s = design.stats();
        let base = &design.basename;

        let num_modules = s.num_modules;
        let num_nodes = s.num_nodes;
        let terminals = s.terminals;
        let nets = s.net_count;
        let pins = s.pin_count;
        let max_degree = s.max_degree;
        let num_nodes_k = s.num_nodes / 1000;
        let num_modules_k = s.num_modules / 1000;
        let nets_k = s.net_count / 1000;

        let (min_x, min_y) = (s.core.min_x, s.core.min_y);
        let (max_x, max_y) = (s.core.max_x, s.core.max_y);
        let row_height = s.row_height;
        let row_number = s.rows_parsed;
        let site_step = s.site_step;

        let core_area = s.core_area;
        let cell_area = s.cell_area;
        let movable_area = s.movable_area;
        let fixed_area = s.fixed_area;
        let fixed_in_core = s.fixed_in_core_area;
        let core_area_sci = format_sci(s.core_area);
        let cell_area_sci = format_sci(s.cell_area);
        let movable_area_sci = format_sci(s.movable_area);
        let fixed_area_sci = format_sci(s.fixed_area);
        let fixed_in_core_sci = format_sci(s.fixed_in_core_area);
        let util = format!("{:.2}", s.placement_util);
        let density = format!("{:.2}", s.core_density);

        let b2 = s.degrees.two;
        let b3 = s.degrees.three_to_ten;
        let b11 = s.degrees.eleven_to_hundred;
        let b100 = s.degrees.over_hundred;

        self.write_line(format_args_f!("Use BOOKSHELF placement format"))?;
        self.write_line(format_args_f!(
            "Reading AUX file: {base}/{base}.aux {base}.nodes {base}.nets {base}.wts {base}.pl {base}.scl"
        ))?;
        self.write_line(format_args_f!(
            "Set core region from site info: lower left: ({min_x},{min_y}) to upper right: ({max_x},{max_y})"
        ))?;
        self.write_line(format_args_f!("NumModules: {num_modules}"))?;
        self.write_line(format_args_f!("NumNodes: {num_nodes} (= {num_nodes_k}k)"))?;
        self.write_line(format_args_f!("Terminals: {terminals}"))?;
        self.write_line(format_args_f!("Nets: {nets}"))?;
        self.write_line(format_args_f!("Pins: {pins}"))?;
        self.write_line(format_args_f!("Max net degree= {max_degree}"))?;
        self.write_line(format_args_f!(
            "Initialize module position with file: {base}.pl"
        ))?;
        self.write_line(format_args_f!("<<<< DATABASE SUMMARIES >>>>"))?;
        self.write_line(format_args_f!(
            "Core region: lower left: ({min_x},{min_y}) to upper right: ({max_x},{max_y})"
        ))?;
        self.write_line(format_args_f!(
            "Row Height/Number: {row_height} / {row_number} (site step {site_step}.000000)"
        ))?;
        self.write_line(format_args_f!("Core Area: {core_area} ({core_area_sci})"))?;
        self.write_line(format_args_f!("Cell Area: {cell_area} ({cell_area_sci})"))?;
        self.write_line(format_args_f!(
            "Movable Area: {movable_area} ({movable_area_sci})"
        ))?;
        self.write_line(format_args_f!("Fixed Area: {fixed_area} ({fixed_area_sci})"))?;
        self.write_line(format_args_f!(
            "Fixed Area in Core: {fixed_in_core} ({fixed_in_core_sci})"
        ))?;
        self.write_line(format_args_f!("Placement Util.: {util}% (=move/freeSites)"))?;
        self.write_line(format_args_f!("Core Density: {density}% (=usedArea/core)"))?;
        self.write_line(format_args_f!("Cell #: {num_nodes} (={num_nodes_k}k)"))?;
        self.write_line(format_args_f!(
            "Object #: {num_modules} (={num_modules_k}k) (fixed: {terminals}) (macro: 0)"
        ))?;
        self.write_line(format_args_f!("Net #: {nets} (={nets_k}k)"))?;
        self.write_line(format_args_f!("Max net degree=: {max_degree}"))?;
        self.write_line(format_args_f!(
            "Pin 2 ({b2}) 3-10 ({b3}) 11-100 ({b11}) 100- ({b100})"
        ))?;
        self.write_line(format_args_f!("Pin #: {pins}"))?;
        self.dest.flush()?;
        Ok(())
    }
    /// Helper function writing a single line.
    /// The newline character is added here.
    fn write_line(&mut self, args: std::fmt::Arguments) -> std::io::Result<()> {
        writeln!(self.dest, "{}", args)
    }
}
