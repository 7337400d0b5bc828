//!
//! # BookShelf Reading Module
//!
//! Facilities for reading the BookShelf format family from files or strings.
//! Includes the shared [LineScanner] and the five per-suffix parsers,
//! aggregated by [parse_design].
//!

// Standard Lib Imports
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader, Cursor};
use std::path::Path;
use std::str::FromStr;

// Local imports
use super::data::*;

/// Leading text of the format-magic header line, e.g. `UCLA nodes 1.0`
const MAGIC: &str = "UCLA";

/// Parse a [BsDesign] from the five `<dir>/<basename>.*` files.
///
/// The `.nodes`, `.pl`, `.nets`, and `.scl` files are required; a missing
/// or unreadable one aborts with [BsError::Io]. The `.wts` file is
/// optional, and its absence yields an empty weight map.
pub fn parse_design(dir: impl AsRef<Path>, basename: &str) -> BsResult<BsDesign> {
    let dir = dir.as_ref();
    let path = |suffix: &str| dir.join(format!("{}.{}", basename, suffix));
    Ok(BsDesign {
        basename: basename.to_string(),
        nodes: parse_nodes(path("nodes"))?,
        placements: parse_pl(path("pl"))?,
        nets: parse_nets(path("nets"))?,
        scl: parse_scl(path("scl"))?,
        weights: parse_wts(path("wts"))?,
    })
}

/// Parse node content from `.nodes` file `fname`
pub fn parse_nodes(fname: impl AsRef<Path>) -> BsResult<HashMap<String, BsNode>> {
    let fname = fname.as_ref();
    read_nodes(open_reader(fname)?, fname)
}
/// Parse node content from string `src`
pub fn parse_nodes_str(src: &str) -> BsResult<HashMap<String, BsNode>> {
    read_nodes(Cursor::new(src), Path::new("<string>"))
}
/// Parse placement content from `.pl` file `fname`
pub fn parse_pl(fname: impl AsRef<Path>) -> BsResult<HashMap<String, BsPlacement>> {
    let fname = fname.as_ref();
    read_pl(open_reader(fname)?, fname)
}
/// Parse placement content from string `src`
pub fn parse_pl_str(src: &str) -> BsResult<HashMap<String, BsPlacement>> {
    read_pl(Cursor::new(src), Path::new("<string>"))
}
/// Parse netlist content from `.nets` file `fname`
pub fn parse_nets(fname: impl AsRef<Path>) -> BsResult<Vec<BsNet>> {
    let fname = fname.as_ref();
    read_nets(open_reader(fname)?, fname)
}
/// Parse netlist content from string `src`
pub fn parse_nets_str(src: &str) -> BsResult<Vec<BsNet>> {
    read_nets(Cursor::new(src), Path::new("<string>"))
}
/// Parse row-layout content from `.scl` file `fname`
pub fn parse_scl(fname: impl AsRef<Path>) -> BsResult<BsRowLayout> {
    let fname = fname.as_ref();
    read_scl(open_reader(fname)?, fname)
}
/// Parse row-layout content from string `src`
pub fn parse_scl_str(src: &str) -> BsResult<BsRowLayout> {
    read_scl(Cursor::new(src), Path::new("<string>"))
}
/// Parse net-weight content from the optional `.wts` file `fname`.
/// An unopenable weights file is not an error; it yields an empty map.
pub fn parse_wts(fname: impl AsRef<Path>) -> BsResult<HashMap<String, BsDecimal>> {
    let fname = fname.as_ref();
    match File::open(fname) {
        Ok(f) => read_wts(BufReader::new(f), fname),
        Err(_) => Ok(HashMap::new()),
    }
}
/// Parse net-weight content from string `src`
pub fn parse_wts_str(src: &str) -> BsResult<HashMap<String, BsDecimal>> {
    read_wts(Cursor::new(src), Path::new("<string>"))
}

/// Open required input file `fname`, or fail with [BsError::Io]
fn open_reader(fname: &Path) -> BsResult<BufReader<File>> {
    match File::open(fname) {
        Ok(f) => Ok(BufReader::new(f)),
        Err(err) => Err(BsError::Io {
            path: fname.to_path_buf(),
            err,
        }),
    }
}

/// # BookShelf Line Scanner
///
/// Shared low-level text normalization for every parser in the family.
/// Produces a lazy, finite, non-restartable sequence of [TokenLine]s, one
/// per semantically relevant source line. Dropped before tokenization:
/// blank lines, `#` comments, `UCLA` format-magic headers, and (unless
/// constructed via [LineScanner::keeping_counts]) the count-header lines
/// named in [BsKey::COUNT_HEADERS]. Every colon is replaced by a space
/// before whitespace tokenization, so `key : value` and `key: value`
/// tokenize uniformly.
pub struct LineScanner<R: BufRead> {
    /// Source line iterator
    lines: std::io::Lines<R>,
    /// Physical line number of the most recently read line (1-based)
    line_num: usize,
    /// Deliver count-header lines instead of dropping them
    keep_counts: bool,
}
impl<R: BufRead> LineScanner<R> {
    /// Create a [LineScanner] which drops count-header lines
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line_num: 0,
            keep_counts: false,
        }
    }
    /// Create a [LineScanner] which delivers count-header lines.
    /// The `.scl` parser consumes `NumRows` this way.
    pub fn keeping_counts(reader: R) -> Self {
        Self {
            keep_counts: true,
            ..Self::new(reader)
        }
    }
    /// Get the next semantically relevant line's tokens,
    /// or `None` at end of input.
    pub fn next_line(&mut self) -> BsResult<Option<TokenLine>> {
        for line in self.lines.by_ref() {
            let line = line?;
            self.line_num += 1;
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with(MAGIC) {
                continue;
            }
            if !self.keep_counts
                && BsKey::COUNT_HEADERS
                    .iter()
                    .any(|k| trimmed.starts_with(k.to_str()))
            {
                continue;
            }
            let tokens: Vec<String> = trimmed
                .replace(':', " ")
                .split_whitespace()
                .map(str::to_string)
                .collect();
            if tokens.is_empty() {
                // e.g. a line of nothing but colons
                continue;
            }
            return Ok(Some(TokenLine {
                num: self.line_num,
                tokens,
            }));
        }
        Ok(None)
    }
}
/// One scanned line: its 1-based physical line number and its
/// colon-normalized whitespace tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenLine {
    pub num: usize,
    pub tokens: Vec<String>,
}

/// # Numeric Field Policy
///
/// The format family mixes load-bearing numeric fields with provisional
/// ones, and the failure handling differs per field. Each parser names its
/// fields' policies in the table below, keeping the asymmetry in one
/// auditable place rather than scattered through the parse loops.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FieldPolicy {
    /// Parse failure is fatal to the whole parse
    Strict,
    /// Parse failure drops the containing line
    SkipLine,
    /// Parse failure falls back to the zero value
    Zero,
}

// The field-policy table.
// Node geometry is the sole strict entry: every downstream area and
// density figure is meaningless without it. Placement coordinates may be
// provisional in real benchmarks, so their lines drop rather than abort.
const NODE_DIMS: FieldPolicy = FieldPolicy::Strict;
const PLACE_COORDS: FieldPolicy = FieldPolicy::SkipLine;
const PIN_OFFSETS: FieldPolicy = FieldPolicy::Zero;
const WEIGHT_VALUE: FieldPolicy = FieldPolicy::SkipLine;
const ROW_FIELDS: FieldPolicy = FieldPolicy::SkipLine;
const ROW_COUNT: FieldPolicy = FieldPolicy::Zero;

/// Parse numeric token `tok` under `policy`.
/// `Ok(None)` means the caller drops the line; [FieldPolicy::Strict] and
/// [FieldPolicy::Zero] never produce it.
fn field<T>(
    policy: FieldPolicy,
    tok: &str,
    file: &Path,
    line: usize,
    name: &'static str,
) -> BsResult<Option<T>>
where
    T: FromStr + Default,
{
    match tok.parse::<T>() {
        Ok(val) => Ok(Some(val)),
        Err(_) => match policy {
            FieldPolicy::Strict => Err(BsError::Parse {
                file: file.to_path_buf(),
                line,
                field: name,
            }),
            FieldPolicy::SkipLine => Ok(None),
            FieldPolicy::Zero => Ok(Some(T::default())),
        },
    }
}
/// Parse the numeric token pair `(a, b)` under `policy`, applied jointly:
/// if either token fails, the pair as a whole takes the policy's fallback.
fn field_pair<T>(
    policy: FieldPolicy,
    a: &str,
    b: &str,
    file: &Path,
    line: usize,
    name: &'static str,
) -> BsResult<Option<(T, T)>>
where
    T: FromStr + Default,
{
    match (a.parse::<T>(), b.parse::<T>()) {
        (Ok(x), Ok(y)) => Ok(Some((x, y))),
        _ => match policy {
            FieldPolicy::Strict => Err(BsError::Parse {
                file: file.to_path_buf(),
                line,
                field: name,
            }),
            FieldPolicy::SkipLine => Ok(None),
            FieldPolicy::Zero => Ok(Some((T::default(), T::default()))),
        },
    }
}

/// Read `.nodes` content: `name width height [terminal-marker]` per line.
/// Duplicate names are last-write-wins.
fn read_nodes(reader: impl BufRead, file: &Path) -> BsResult<HashMap<String, BsNode>> {
    let mut nodes = HashMap::new();
    let mut scanner = LineScanner::new(reader);
    while let Some(line) = scanner.next_line()? {
        let t = &line.tokens;
        if t.len() < 3 {
            // Stray short lines are not data
            continue;
        }
        let width = match field::<i32>(NODE_DIMS, &t[1], file, line.num, "width")? {
            Some(v) => v,
            None => continue,
        };
        let height = match field::<i32>(NODE_DIMS, &t[2], file, line.num, "height")? {
            Some(v) => v,
            None => continue,
        };
        let terminal = t
            .get(3)
            .map(|tok| tok.to_ascii_lowercase().contains("terminal"))
            .unwrap_or(false);
        let name = t[0].clone();
        nodes.insert(
            name.clone(),
            BsNode {
                name,
                width,
                height,
                terminal,
            },
        );
    }
    Ok(nodes)
}

/// Read `.pl` content: `name x y : orient [flags...]` per line.
/// Lines whose coordinates fail to parse are dropped, preserving the rest
/// of the design. Duplicate names are last-write-wins, as for nodes.
fn read_pl(reader: impl BufRead, file: &Path) -> BsResult<HashMap<String, BsPlacement>> {
    let mut placements = HashMap::new();
    let mut scanner = LineScanner::new(reader);
    while let Some(line) = scanner.next_line()? {
        let t = &line.tokens;
        if t.len() < 4 {
            continue;
        }
        let (x, y) = match field_pair::<i64>(PLACE_COORDS, &t[1], &t[2], file, line.num, "x/y")? {
            Some(xy) => xy,
            None => continue,
        };
        let orient = t[3]
            .chars()
            .next()
            .map(|c| c.to_ascii_uppercase())
            .unwrap_or('N');
        // Trailing tokens carry flags such as FIXED / PLACED / UNPLACED
        let fixed = t[4..]
            .iter()
            .any(|tok| tok.to_ascii_uppercase().contains("FIXED"));
        let name = t[0].clone();
        placements.insert(
            name.clone(),
            BsPlacement {
                name,
                x,
                y,
                orient,
                fixed,
            },
        );
    }
    Ok(placements)
}

/// # Net-Accumulation State
///
/// Nets have no closing delimiter of their own. A net ends at the next
/// `NetDegree` header, upon reaching its declared degree, or at end of
/// file; [NetState::flush] is the single completion point for all three.
#[derive(Debug, Clone, PartialEq, Eq)]
enum NetState {
    /// No net currently accumulating
    Idle,
    /// Mid-net, collecting pin records
    Accumulating {
        name: String,
        /// Declared degree. Non-positive values (including the -1
        /// parse-failure default) disable the degree-reached flush.
        declared: i32,
        pins: Vec<BsPin>,
    },
}
impl NetState {
    /// Complete the accumulating net, if any, pushing it onto `nets` and
    /// returning to [NetState::Idle]. Nets with empty names are dropped;
    /// pin-count / declared-degree mismatches are tolerated by design.
    fn flush(&mut self, nets: &mut Vec<BsNet>) {
        if let NetState::Accumulating { name, pins, .. } = std::mem::replace(self, NetState::Idle) {
            if !name.is_empty() {
                nets.push(BsNet { name, pins });
            }
        }
    }
}

/// Read `.nets` content: repeated `NetDegree : D name` headers, each
/// followed by that net's pin lines `nodeName direction : xOffset yOffset`.
fn read_nets(reader: impl BufRead, file: &Path) -> BsResult<Vec<BsNet>> {
    let mut nets = Vec::new();
    let mut state = NetState::Idle;
    let mut scanner = LineScanner::new(reader);
    while let Some(line) = scanner.next_line()? {
        let t = &line.tokens;
        if t[0] == BsKey::NetDegree.to_str() {
            state.flush(&mut nets);
            if t.len() >= 3 {
                state = NetState::Accumulating {
                    name: t[2].clone(),
                    declared: t[1].parse().unwrap_or(-1),
                    pins: Vec::new(),
                };
            } else {
                // Header missing its degree or name: accumulate namelessly,
                // so the block's pins are dropped at the next flush
                state = NetState::Accumulating {
                    name: String::new(),
                    declared: -1,
                    pins: Vec::new(),
                };
            }
            continue;
        }
        let degree_reached = match &mut state {
            // Pin-like lines outside any net block are not data
            NetState::Idle => false,
            NetState::Accumulating {
                declared, pins, ..
            } => {
                if t.len() < 4 {
                    continue;
                }
                let direction = t[1]
                    .chars()
                    .next()
                    .map(BsPinDirection::from_char)
                    .unwrap_or_default();
                let (x_offset, y_offset) = match field_pair::<BsDecimal>(
                    PIN_OFFSETS,
                    &t[2],
                    &t[3],
                    file,
                    line.num,
                    "offsets",
                )? {
                    Some(xy) => xy,
                    None => continue,
                };
                pins.push(BsPin {
                    node_name: t[0].clone(),
                    direction,
                    x_offset,
                    y_offset,
                });
                *declared > 0 && pins.len() == *declared as usize
            }
        };
        if degree_reached {
            state.flush(&mut nets);
        }
    }
    // Truncated or miscounted trailing nets still flush
    state.flush(&mut nets);
    Ok(nets)
}

/// Read `.scl` content: a `NumRows` declaration plus `CoreRow` ... `End`
/// blocks of key/value lines. A block left open at end of file is
/// discarded.
fn read_scl(reader: impl BufRead, file: &Path) -> BsResult<BsRowLayout> {
    let mut layout = BsRowLayout::default();
    let mut row = BsCoreRow::default();
    let mut open = false;
    let mut scanner = LineScanner::keeping_counts(reader);
    while let Some(line) = scanner.next_line()? {
        let t = &line.tokens;
        match BsKey::from_str(&t[0]) {
            Some(BsKey::NumRows) => {
                if t.len() >= 2 {
                    layout.num_rows = field::<i32>(ROW_COUNT, &t[1], file, line.num, "NumRows")?
                        .unwrap_or_default();
                }
            }
            Some(BsKey::CoreRow) => {
                row = BsCoreRow::default();
                open = true;
            }
            Some(BsKey::End) => {
                if open {
                    layout.rows.push(row.clone());
                    open = false;
                }
            }
            Some(key) if open && t.len() >= 2 => {
                scl_row_field(&mut row, key, t, file, line.num)?;
            }
            // Unrecognized keys, and attributes outside any open block
            _ => (),
        }
    }
    Ok(layout)
}
/// Apply one key/value line of an open `CoreRow` block to `row`
fn scl_row_field(
    row: &mut BsCoreRow,
    key: BsKey,
    t: &[String],
    file: &Path,
    line: usize,
) -> BsResult<()> {
    // All values are tolerant: a malformed one leaves the accumulator as-is
    let int = |tok: &str| field::<i32>(ROW_FIELDS, tok, file, line, "row attribute");
    match key {
        BsKey::Coordinate => {
            if let Some(v) = int(&t[1])? {
                row.coordinate = v;
            }
        }
        BsKey::Height => {
            if let Some(v) = int(&t[1])? {
                row.height = v;
            }
        }
        BsKey::Sitewidth => {
            if let Some(v) = int(&t[1])? {
                row.site_width = v;
            }
        }
        BsKey::Sitespacing => {
            if let Some(v) = int(&t[1])? {
                row.site_spacing = v;
            }
        }
        BsKey::Siteorient => {
            if let Some(v) = int(&t[1])? {
                row.site_orient = v;
            }
        }
        BsKey::Sitesymmetry => {
            if let Some(v) = int(&t[1])? {
                row.site_symmetry = v;
            }
        }
        BsKey::SubrowOrigin => {
            if let Some(v) = field::<i64>(ROW_FIELDS, &t[1], file, line, "SubrowOrigin")? {
                row.subrow_origin = v;
                // `NumSites` rides on the same line: `SubrowOrigin : 0  NumSites : 100`
                for i in 2..t.len().saturating_sub(1) {
                    if t[i] == BsKey::NumSites.to_str() {
                        if let Some(n) =
                            field::<i64>(ROW_FIELDS, &t[i + 1], file, line, "NumSites")?
                        {
                            row.num_sites = n;
                        }
                        break;
                    }
                }
            }
        }
        _ => (),
    };
    Ok(())
}

/// Read `.wts` content: `name weight` per line.
/// Malformed weight values drop only their own line.
fn read_wts(reader: impl BufRead, file: &Path) -> BsResult<HashMap<String, BsDecimal>> {
    let mut weights = HashMap::new();
    let mut scanner = LineScanner::new(reader);
    while let Some(line) = scanner.next_line()? {
        let t = &line.tokens;
        if t.len() < 2 {
            continue;
        }
        let weight = match field::<BsDecimal>(WEIGHT_VALUE, &t[1], file, line.num, "weight")? {
            Some(w) => w,
            None => continue,
        };
        weights.insert(t[0].clone(), weight);
    }
    Ok(weights)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_scans() -> BsResult<()> {
        let src = "UCLA nodes 1.0\n# commentary\n\nNumNodes : 3\n  a1 4 12\n";
        let mut scanner = LineScanner::new(Cursor::new(src));
        let line = scanner.next_line()?.unwrap();
        assert_eq!(line.tokens, vec!["a1", "4", "12"]);
        assert_eq!(line.num, 5);
        assert!(scanner.next_line()?.is_none());
        Ok(())
    }
    #[test]
    fn it_normalizes_colons() -> BsResult<()> {
        let src = "Coordinate:459\nHeight : 12\n";
        let mut scanner = LineScanner::new(Cursor::new(src));
        assert_eq!(
            scanner.next_line()?.unwrap().tokens,
            vec!["Coordinate", "459"]
        );
        assert_eq!(scanner.next_line()?.unwrap().tokens, vec!["Height", "12"]);
        Ok(())
    }
    #[test]
    fn it_keeps_counts_on_request() -> BsResult<()> {
        let src = "NumRows : 2\n";
        let mut scanner = LineScanner::new(Cursor::new(src));
        assert!(scanner.next_line()?.is_none());
        let mut scanner = LineScanner::keeping_counts(Cursor::new(src));
        assert_eq!(
            scanner.next_line()?.unwrap().tokens,
            vec!["NumRows", "2"]
        );
        Ok(())
    }

    #[test]
    fn it_parses_nodes() -> BsResult<()> {
        let src = r#"
        UCLA nodes 1.0
        NumNodes : 3
        NumTerminals : 1

            a1   4  12
            a2   6  12
            p1   1   1  terminal
        "#;
        let nodes = parse_nodes_str(src)?;
        assert_eq!(nodes.len(), 3);
        assert_eq!(
            nodes["a1"],
            BsNode {
                name: "a1".into(),
                width: 4,
                height: 12,
                terminal: false
            }
        );
        assert!(nodes["p1"].terminal);
        Ok(())
    }
    #[test]
    fn it_keeps_last_duplicate_node() -> BsResult<()> {
        let src = "cellA 10 10\ncellA 20 20 terminal\n";
        let nodes = parse_nodes_str(src)?;
        assert_eq!(nodes.len(), 1);
        assert_eq!(
            nodes["cellA"],
            BsNode {
                name: "cellA".into(),
                width: 20,
                height: 20,
                terminal: true
            }
        );
        Ok(())
    }
    #[test]
    fn it_errors_on_bad_node_geometry() {
        let err = parse_nodes_str("a1 wide 12\n").unwrap_err();
        match err {
            BsError::Parse { line, field, .. } => {
                assert_eq!(line, 1);
                assert_eq!(field, "width");
            }
            e => panic!("unexpected error {:?}", e),
        }
    }

    #[test]
    fn it_parses_placements() -> BsResult<()> {
        let src = r#"
        UCLA pl 1.0
        a1    100   200 : N
        a2    -10    40 : fs
        p1      5    20 : N /FIXED
        "#;
        let pls = parse_pl_str(src)?;
        assert_eq!(pls.len(), 3);
        assert_eq!(pls["a1"].x, 100);
        assert_eq!(pls["a2"].orient, 'F');
        assert_eq!(pls["a2"].x, -10);
        assert!(!pls["a2"].fixed);
        assert!(pls["p1"].fixed);
        Ok(())
    }
    #[test]
    fn it_skips_bad_placement_coords() -> BsResult<()> {
        // Malformed coordinates drop their line and nothing else
        let src = "a1 100 200 : N\na2 here 40 : N\na3 7 nope : N\n";
        let pls = parse_pl_str(src)?;
        assert_eq!(pls.len(), 1);
        assert!(pls.contains_key("a1"));
        Ok(())
    }

    #[test]
    fn it_parses_nets() -> BsResult<()> {
        let src = r#"
        UCLA nets 1.0
        NumNets : 2
        NumPins : 4

        NetDegree : 2   netB
            a1  I : -0.500000   -6.000000
            a2  O :  0.500000    6.000000
        NetDegree : 2   netC
            a2  I : 0 0
            a3  O : 0 0
        "#;
        let nets = parse_nets_str(src)?;
        // The degree-reached flush fires before the second header arrives
        assert_eq!(nets.len(), 2);
        assert_eq!(nets[0].name, "netB");
        assert_eq!(nets[0].pins.len(), 2);
        assert_eq!(nets[0].pins[0].direction, BsPinDirection::Input);
        assert_eq!(
            nets[0].pins[0].x_offset,
            BsDecimal::from_str("-0.500000").unwrap()
        );
        assert_eq!(nets[1].name, "netC");
        assert_eq!(nets[1].pins.len(), 2);
        Ok(())
    }
    #[test]
    fn it_flushes_truncated_trailing_net() -> BsResult<()> {
        // Declared degree 3, but the file ends after two pins
        let src = "NetDegree : 3 netA\n a1 I : 0 0\n a2 O : 0 0\n";
        let nets = parse_nets_str(src)?;
        assert_eq!(nets.len(), 1);
        assert_eq!(nets[0].name, "netA");
        assert_eq!(nets[0].pins.len(), 2);
        Ok(())
    }
    #[test]
    fn it_tolerates_overrun_with_unparsed_degree() -> BsResult<()> {
        // A non-numeric degree disables the mid-stream flush entirely;
        // the net terminates only at the next header
        let src = "NetDegree : ? netA\n a1 I : 0 0\n a2 O : 0 0\n a3 B : 0 0\nNetDegree : 1 netB\n a4 I : 0 0\n";
        let nets = parse_nets_str(src)?;
        assert_eq!(nets.len(), 2);
        assert_eq!(nets[0].pins.len(), 3);
        assert_eq!(nets[1].pins.len(), 1);
        Ok(())
    }
    #[test]
    fn it_defaults_bad_pin_offsets() -> BsResult<()> {
        // Offsets default to zero jointly; the pin itself is kept
        let src = "NetDegree : 2 netA\n a1 I : 1.5 oops\n a2 O : 2.0 3.0\n";
        let nets = parse_nets_str(src)?;
        assert_eq!(nets[0].pins.len(), 2);
        assert_eq!(nets[0].pins[0].x_offset, BsDecimal::ZERO);
        assert_eq!(nets[0].pins[0].y_offset, BsDecimal::ZERO);
        assert_eq!(nets[0].pins[1].x_offset, BsDecimal::from(2));
        Ok(())
    }

    #[test]
    fn it_parses_scl() -> BsResult<()> {
        let src = r#"
        UCLA scl 1.0
        NumRows : 2

        CoreRow Horizontal
          Coordinate    :   459
          Height        :   12
          Sitewidth     :    1
          Sitespacing   :    1
          Siteorient    :    1
          Sitesymmetry  :    1
          SubrowOrigin  :  459   NumSites  :  10692
        End
        CoreRow Horizontal
          Coordinate    :   471
          Height        :   12
          SubrowOrigin  :  459   NumSites  :  10692
        End
        "#;
        let scl = parse_scl_str(src)?;
        assert_eq!(scl.num_rows, 2);
        assert_eq!(scl.rows.len(), 2);
        assert_eq!(
            scl.rows[0],
            BsCoreRowBuilder::default()
                .coordinate(459)
                .height(12)
                .site_width(1)
                .site_spacing(1)
                .site_orient(1)
                .site_symmetry(1)
                .subrow_origin(459i64)
                .num_sites(10692i64)
                .build()
                .unwrap()
        );
        assert_eq!(scl.rows[1].coordinate, 471);
        assert_eq!(scl.rows[1].site_width, 0);
        Ok(())
    }
    #[test]
    fn it_discards_unterminated_row_block() -> BsResult<()> {
        let src = "NumRows : 1\nCoreRow Horizontal\n Coordinate : 10\n Height : 12\n";
        let scl = parse_scl_str(src)?;
        assert_eq!(scl.num_rows, 1);
        assert!(scl.rows.is_empty());
        Ok(())
    }
    #[test]
    fn it_parses_zero_row_scl() -> BsResult<()> {
        let scl = parse_scl_str("UCLA scl 1.0\nNumRows : 0\n")?;
        assert_eq!(scl.num_rows, 0);
        assert!(scl.rows.is_empty());
        Ok(())
    }
    #[test]
    fn it_defaults_unparsed_num_rows() -> BsResult<()> {
        let scl = parse_scl_str("NumRows : many\n")?;
        assert_eq!(scl.num_rows, 0);
        Ok(())
    }

    #[test]
    fn it_parses_weights() -> BsResult<()> {
        let src = "UCLA wts 1.0\nn1 2.0\nn2 1.5\nn3 heavy\n";
        let wts = parse_wts_str(src)?;
        // The malformed weight drops only its own line
        assert_eq!(wts.len(), 2);
        assert_eq!(wts["n2"], BsDecimal::from_str("1.5").unwrap());
        Ok(())
    }
    #[test]
    fn missing_wts_file_is_empty() -> BsResult<()> {
        let wts = parse_wts("/no/such/dir/missing.wts")?;
        assert!(wts.is_empty());
        Ok(())
    }
}
