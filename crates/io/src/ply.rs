use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use log::{debug, warn};
use posecloud_core::{HasColor, HasPosition, PointWithInfo, PointWithInfoVec};

use crate::PlyError;

/// Tool name recorded in the generator comment of every exported file.
pub const GENERATOR: &str = "posecloud";

/// Write `points` as an ASCII PLY stream to `w`.
///
/// Every vertex carries `float x y z` followed by `uchar red green blue
/// alpha`. Colors go through a saturating cast: fractions truncate, values
/// outside `0..=255` clamp, NaN becomes 0. A non-empty `comment` follows the
/// generator comment, one `comment` header line per line of text; the text
/// is written as given, blank lines and surrounding spaces included.
pub fn write_ply_to<W, P>(mut w: W, points: &[P], comment: &str) -> io::Result<()>
where
    W: Write,
    P: HasPosition + HasColor,
{
    w.write_all(b"ply\n")?;
    w.write_all(b"format ascii 1.0\n")?;
    writeln!(w, "comment generated by {}", GENERATOR)?;
    for line in comment.lines() {
        writeln!(w, "comment {}", line)?;
    }
    writeln!(w, "element vertex {}", points.len())?;
    w.write_all(b"property float x\n")?;
    w.write_all(b"property float y\n")?;
    w.write_all(b"property float z\n")?;
    w.write_all(b"property uchar red\n")?;
    w.write_all(b"property uchar green\n")?;
    w.write_all(b"property uchar blue\n")?;
    w.write_all(b"property uchar alpha\n")?;
    w.write_all(b"end_header\n")?;

    for p in points {
        let [x, y, z, _] = p.position();
        let [r, g, b, a] = p.color();
        writeln!(
            w,
            "{} {} {} {} {} {} {}",
            x, y, z, r as u8, g as u8, b as u8, a as u8
        )?;
    }

    w.flush()
}

/// Write an ASCII PLY file, reporting what went wrong on failure.
///
/// The file handle is closed on every path out of this function.
pub fn try_write_ply<P>(
    path: impl AsRef<Path>,
    points: &[P],
    comment: &str,
) -> Result<(), PlyError>
where
    P: HasPosition + HasColor,
{
    let path = path.as_ref();
    let file = File::create(path).map_err(|source| PlyError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let mut w = BufWriter::new(file);
    write_ply_to(&mut w, points, comment).map_err(|source| PlyError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Write an ASCII PLY file. Returns `false` if it could not be written.
///
/// Failures never panic or propagate; they are logged at warn level with the
/// offending path.
pub fn write_ply<P>(path: impl AsRef<Path>, points: &[P], comment: &str) -> bool
where
    P: HasPosition + HasColor,
{
    let path = path.as_ref();
    match try_write_ply(path, points, comment) {
        Ok(()) => {
            debug!("wrote {} points to {}", points.len(), path.display());
            true
        }
        Err(e) => {
            warn!("{}", e);
            false
        }
    }
}

/// Parsed header information.
struct PlyHeader {
    vertex_count: usize,
    /// Data lines of elements declared before `vertex`.
    skip_lines: usize,
    property_names: Vec<String>,
}

fn parse_ply_header(text: &str) -> Result<PlyHeader, PlyError> {
    let mut lines = text.lines().map(str::trim);
    if lines.next() != Some("ply") {
        return Err(PlyError::InvalidData(
            "file does not start with 'ply'".to_string(),
        ));
    }

    let mut format_seen = false;
    let mut vertex: Option<(usize, Vec<String>)> = None;
    let mut in_vertex_element = false;
    let mut skip_lines = 0usize;

    for line in lines {
        let parts: Vec<&str> = line.split_whitespace().collect();
        match parts.as_slice() {
            ["format", "ascii", _] => format_seen = true,
            ["format", other, ..] => {
                return Err(PlyError::UnsupportedFormat(other.to_string()));
            }
            ["element", name, count] => {
                let count = count.parse::<usize>().map_err(|e| {
                    PlyError::InvalidData(format!("invalid element count '{}': {}", count, e))
                })?;
                in_vertex_element = *name == "vertex";
                if in_vertex_element {
                    vertex = Some((count, Vec::new()));
                } else if vertex.is_none() {
                    skip_lines += count;
                }
            }
            ["property", "list", ..] if in_vertex_element => {
                return Err(PlyError::UnsupportedFormat(
                    "list property on vertex element".to_string(),
                ));
            }
            ["property", _, name] if in_vertex_element => {
                if let Some((_, names)) = vertex.as_mut() {
                    names.push(name.to_string());
                }
            }
            _ => {}
        }
    }

    if !format_seen {
        return Err(PlyError::InvalidData("PLY format line missing".to_string()));
    }
    let (vertex_count, property_names) = vertex
        .ok_or_else(|| PlyError::InvalidData("missing vertex element".to_string()))?;

    Ok(PlyHeader {
        vertex_count,
        skip_lines,
        property_names,
    })
}

/// Byte offsets of the `end_header` line: where it starts and where the
/// body begins. Only a line that is `end_header` by itself counts.
fn find_header_end(data: &[u8]) -> Option<(usize, usize)> {
    let mut start = 0;
    while start < data.len() {
        let line_end = data[start..]
            .iter()
            .position(|&b| b == b'\n')
            .map_or(data.len(), |i| start + i);
        if data[start..line_end].trim_ascii() == b"end_header" {
            return Some((start, (line_end + 1).min(data.len())));
        }
        start = line_end + 1;
    }
    None
}

/// Read the vertices of an ASCII PLY file into point records.
///
/// `x`, `y`, `z` are required; `red`, `green`, `blue` default to 0 and
/// `alpha` to 255 when absent. Positions get `w = 1` and weights are 0.
pub fn read_ply(path: impl AsRef<Path>) -> Result<PointWithInfoVec, PlyError> {
    let path = path.as_ref();
    let data = fs::read(path).map_err(|source| PlyError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let (header_end, body_start) = find_header_end(&data)
        .ok_or_else(|| PlyError::InvalidData("missing end_header in PLY file".to_string()))?;
    let header_text = std::str::from_utf8(&data[..header_end])
        .map_err(|_| PlyError::InvalidData("PLY header not valid UTF-8".to_string()))?;
    let header = parse_ply_header(header_text)?;

    let body = std::str::from_utf8(&data[body_start..])
        .map_err(|_| PlyError::InvalidData("PLY body not valid UTF-8".to_string()))?;

    let column = |name: &str| header.property_names.iter().position(|n| n == name);
    let (idx_x, idx_y, idx_z) = match (column("x"), column("y"), column("z")) {
        (Some(ix), Some(iy), Some(iz)) => (ix, iy, iz),
        _ => {
            return Err(PlyError::InvalidData(
                "PLY file missing required x, y, z properties".to_string(),
            ));
        }
    };
    let channels = [
        (column("red"), 0.0),
        (column("green"), 0.0),
        (column("blue"), 0.0),
        (column("alpha"), 255.0),
    ];

    let mut rows = body
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .skip(header.skip_lines);
    let mut points = PointWithInfoVec::with_capacity(header.vertex_count.min(body.len()));

    for i in 0..header.vertex_count {
        let line = rows.next().ok_or_else(|| {
            PlyError::InvalidData(format!(
                "expected {} vertices, found {}",
                header.vertex_count, i
            ))
        })?;
        let fields = line
            .split_whitespace()
            .map(str::parse::<f32>)
            .collect::<Result<Vec<f32>, _>>()
            .map_err(|e| PlyError::InvalidData(format!("vertex {}: {}", i, e)))?;
        if fields.len() < header.property_names.len() {
            return Err(PlyError::InvalidData(format!(
                "vertex line has {} fields, expected {}",
                fields.len(),
                header.property_names.len()
            )));
        }

        let color = channels.map(|(idx, default)| idx.map_or(default, |c| fields[c]));
        points.push(PointWithInfo::new(
            [fields[idx_x], fields[idx_y], fields[idx_z], 1.0],
            color,
            0.0,
        ));
    }

    Ok(points)
}
