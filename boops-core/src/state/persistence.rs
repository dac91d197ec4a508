//! Line-oriented pattern files.
//!
//! ```text
//! appliesTo: https://www.jahnichen.de/plugins/lv2/BOops;
//! sl:0; st:4; gt:1.000000; sz:2.000000; mx:0.800000;
//! slo:3; typ:0; ptx:0.000000; pty:0.500000; h1x:0.000000; h1y:0.000000; h2x:0.000000; h2y:0.000000;
//! ```
//!
//! Only non-default pads and shape nodes are written. Loading replaces the
//! page contents as one undoable pad batch; shapes are replaced wholesale.

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::path::Path;

use boops_types::{Node, NodeType, Pad, PadMessage, Point, Shape, NR_SLOTS, NR_STEPS};

use super::Pattern;

#[derive(Debug, thiserror::Error)]
pub enum PatternFileError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("missing appliesTo header")]
    MissingHeader,
    #[error("pattern is for {found}, expected {expected}")]
    WrongPlugin { expected: String, found: String },
    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },
}

/// Parsed file contents, validated before anything touches the pattern.
#[derive(Debug, Default)]
struct PatternFile {
    pads: Vec<PadMessage>,
    shapes: BTreeMap<usize, Shape>,
}

pub fn pattern_to_string(pattern: &Pattern, uri: &str) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "appliesTo: {};", uri);
    for row in 0..NR_SLOTS {
        for (step, pad) in pattern.row(row).iter().enumerate() {
            if *pad == Pad::default() {
                continue;
            }
            let _ = writeln!(
                out,
                "sl:{}; st:{}; gt:{:.6}; sz:{:.6}; mx:{:.6};",
                row, step, pad.gate, pad.size, pad.mix
            );
        }
    }
    for row in 0..NR_SLOTS {
        for node in pattern.get_shape(row).nodes() {
            let _ = writeln!(
                out,
                "slo:{}; typ:{}; ptx:{:.6}; pty:{:.6}; h1x:{:.6}; h1y:{:.6}; h2x:{:.6}; h2y:{:.6};",
                row,
                node.node_type.id(),
                node.point.x,
                node.point.y,
                node.handle1.x,
                node.handle1.y,
                node.handle2.x,
                node.handle2.y
            );
        }
    }
    out
}

/// Replace `pattern`'s pads and shapes with the file contents.
/// On error the pattern is left untouched.
pub fn pattern_from_str(text: &str, pattern: &mut Pattern, uri: &str) -> Result<(), PatternFileError> {
    let file = parse(text, uri)?;

    pattern.store();
    for row in 0..NR_SLOTS {
        for step in 0..NR_STEPS {
            if pattern.get_pad(row, step) != Pad::default() {
                pattern.set_pad(row, step, Pad::default());
            }
        }
    }
    for msg in &file.pads {
        pattern.set_pad(msg.row, msg.step, msg.pad);
    }
    pattern.store();

    for row in 0..NR_SLOTS {
        let shape = file.shapes.get(&row).cloned().unwrap_or_default();
        pattern.set_shape(row, shape);
    }
    log::debug!(
        target: "persistence",
        "loaded {} pads and {} shapes",
        file.pads.len(),
        file.shapes.len()
    );
    Ok(())
}

pub fn save_pattern(path: &Path, pattern: &Pattern, uri: &str) -> Result<(), PatternFileError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(path, pattern_to_string(pattern, uri))?;
    Ok(())
}

pub fn load_pattern(path: &Path, pattern: &mut Pattern, uri: &str) -> Result<(), PatternFileError> {
    let text = std::fs::read_to_string(path)?;
    pattern_from_str(&text, pattern, uri)
}

fn parse(text: &str, uri: &str) -> Result<PatternFile, PatternFileError> {
    let mut lines = text
        .lines()
        .enumerate()
        .map(|(i, l)| (i + 1, l.trim()))
        .filter(|(_, l)| !l.is_empty());

    let (_, header) = lines.next().ok_or(PatternFileError::MissingHeader)?;
    let found = header
        .strip_prefix("appliesTo:")
        .ok_or(PatternFileError::MissingHeader)?
        .trim()
        .trim_end_matches(';')
        .trim();
    if found != uri {
        return Err(PatternFileError::WrongPlugin {
            expected: uri.to_string(),
            found: found.to_string(),
        });
    }

    let mut file = PatternFile::default();
    for (line_no, line) in lines {
        let fields = Fields::parse(line);
        if fields.has("sl") {
            let row = fields.index("sl", NR_SLOTS, line_no)?;
            let step = fields.index("st", NR_STEPS, line_no)?;
            let gate = fields.float("gt", line_no)? as f32;
            let size = fields.float("sz", line_no)? as f32;
            let mix = fields.float("mx", line_no)? as f32;
            let pad = Pad::new(gate.clamp(0.0, 1.0), size.clamp(0.0, NR_STEPS as f32), mix.clamp(0.0, 1.0));
            file.pads.push(PadMessage::new(row, step, pad));
        } else if fields.has("slo") {
            let row = fields.index("slo", NR_SLOTS, line_no)?;
            let typ = fields.float("typ", line_no)?;
            let node_type = NodeType::from_id(typ as u8).ok_or_else(|| PatternFileError::Parse {
                line: line_no,
                message: format!("unknown node type {}", typ),
            })?;
            let node = Node::new(
                node_type,
                Point::new(fields.float("ptx", line_no)?, fields.float("pty", line_no)?),
                Point::new(fields.float("h1x", line_no)?, fields.float("h1y", line_no)?),
                Point::new(fields.float("h2x", line_no)?, fields.float("h2y", line_no)?),
            );
            let shape = file.shapes.entry(row).or_default();
            if !shape.append_node(node) {
                log::warn!(target: "persistence", "line {}: shape {} is full, node dropped", line_no, row);
            }
        } else {
            log::warn!(target: "persistence", "line {}: unrecognized entry skipped", line_no);
        }
    }
    Ok(file)
}

/// `key:value;` pairs of one line.
struct Fields<'a> {
    pairs: Vec<(&'a str, &'a str)>,
}

impl<'a> Fields<'a> {
    fn parse(line: &'a str) -> Self {
        let pairs = line
            .split(';')
            .filter_map(|part| {
                let (key, value) = part.split_once(':')?;
                Some((key.trim(), value.trim()))
            })
            .collect();
        Self { pairs }
    }

    fn get(&self, key: &str) -> Option<&'a str> {
        self.pairs.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
    }

    fn has(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    fn float(&self, key: &str, line: usize) -> Result<f64, PatternFileError> {
        let raw = self.get(key).ok_or_else(|| PatternFileError::Parse {
            line,
            message: format!("missing field {}", key),
        })?;
        raw.parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| PatternFileError::Parse {
                line,
                message: format!("invalid value for {}: {}", key, raw),
            })
    }

    /// Integer index clamped into `0..len`.
    fn index(&self, key: &str, len: usize, line: usize) -> Result<usize, PatternFileError> {
        let value = self.float(key, line)?;
        Ok(boops_types::limit_index(value as isize, len))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const URI: &str = "https://www.jahnichen.de/plugins/lv2/BOops";

    fn sample_pattern() -> Pattern {
        let mut p = Pattern::new(8);
        p.set_pad(0, 4, Pad::new(1.0, 2.0, 0.8));
        p.set_pad(5, 31, Pad::new(0.5, 1.0, 0.25));
        p.store();
        p.set_shape(
            3,
            Shape::from_nodes([
                Node::point(0.0, 0.5),
                Node::new(NodeType::Smooth, Point::new(0.5, 1.0), Point::new(-0.1, 0.0), Point::new(0.1, 0.0)),
            ]),
        );
        p
    }

    #[test]
    fn text_contains_header_and_only_used_cells() {
        let text = pattern_to_string(&sample_pattern(), URI);
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("appliesTo: https://www.jahnichen.de/plugins/lv2/BOops;"));
        assert_eq!(text.lines().filter(|l| l.starts_with("sl:")).count(), 2);
        assert_eq!(text.lines().filter(|l| l.starts_with("slo:")).count(), 2);
        assert!(text.contains("sl:0; st:4; gt:1.000000; sz:2.000000; mx:0.800000;"));
    }

    #[test]
    fn save_then_load_restores_contents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("patterns").join("one.boops.pattern");
        let original = sample_pattern();
        save_pattern(&path, &original, URI).unwrap();

        let mut loaded = Pattern::new(8);
        load_pattern(&path, &mut loaded, URI).unwrap();
        assert_eq!(loaded.pads(), original.pads());
        assert_eq!(loaded.get_shape(3), original.get_shape(3));
        assert!(loaded.get_shape(0).is_empty());
    }

    #[test]
    fn load_is_one_undo_step() {
        let text = pattern_to_string(&sample_pattern(), URI);
        let mut p = Pattern::new(8);
        p.set_pad(1, 1, Pad::new(1.0, 1.0, 1.0));
        p.store();
        pattern_from_str(&text, &mut p, URI).unwrap();
        assert_eq!(p.get_pad(1, 1), Pad::default());
        p.undo();
        assert_eq!(p.get_pad(1, 1), Pad::new(1.0, 1.0, 1.0));
        assert_eq!(p.get_pad(0, 4), Pad::default());
    }

    #[test]
    fn wrong_plugin_is_rejected() {
        let text = "appliesTo: https://www.jahnichen.de/plugins/lv2/BNoname01;\nsl:0; st:0; gt:1; sz:1; mx:1;\n";
        let mut p = Pattern::new(8);
        match pattern_from_str(text, &mut p, URI) {
            Err(PatternFileError::WrongPlugin { found, .. }) => {
                assert_eq!(found, "https://www.jahnichen.de/plugins/lv2/BNoname01")
            }
            other => panic!("expected WrongPlugin, got {:?}", other),
        }
        assert_eq!(p.get_pad(0, 0), Pad::default());
    }

    #[test]
    fn missing_header_is_rejected() {
        let mut p = Pattern::new(8);
        assert!(matches!(
            pattern_from_str("sl:0; st:0; gt:1; sz:1; mx:1;", &mut p, URI),
            Err(PatternFileError::MissingHeader)
        ));
        assert!(matches!(pattern_from_str("", &mut p, URI), Err(PatternFileError::MissingHeader)));
    }

    #[test]
    fn malformed_pad_line_leaves_pattern_untouched() {
        let mut p = sample_pattern();
        let before = *p.pads();
        let text = format!("appliesTo: {};\nsl:1; st:2; gt:abc; sz:1; mx:1;\n", URI);
        match pattern_from_str(&text, &mut p, URI) {
            Err(PatternFileError::Parse { line, .. }) => assert_eq!(line, 2),
            other => panic!("expected Parse, got {:?}", other),
        }
        assert_eq!(*p.pads(), before);
    }

    #[test]
    fn unknown_lines_are_skipped_and_indices_clamped() {
        let text = format!(
            "appliesTo: {};\n\nfoo:bar;\nsl:40; st:-2; gt:2.0; sz:1; mx:0.5;\n",
            URI
        );
        let mut p = Pattern::new(8);
        pattern_from_str(&text, &mut p, URI).unwrap();
        assert_eq!(p.get_pad(NR_SLOTS - 1, 0), Pad::new(1.0, 1.0, 0.5));
    }
}
