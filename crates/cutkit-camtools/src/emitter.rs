//! G-code program emission.
//!
//! Walks merged [`CamPath`]s through their depth passes and writes the
//! motion program. Every line ends with CRLF, coordinates use a fixed number
//! of decimals and feed words appear only on the first move of a segment.
//!
//! Per path the tool starts and ends at safe height. For each pass it
//! retracts if the path cannot be closed safely (or bridges are in play),
//! rapids to the first point, drops to the previous pass depth, then plunges
//! or ramps to the new depth and cuts. Below bridge height the path is split
//! into depth and bridge parts, rising to bridge height over each bridge.

use cutkit_core::geometry::Point;
use cutkit_core::{MaterialSpec, OperationSpec, ProgramOptions, ToolSpec, Units};
use tracing::debug;

use crate::bridges::{BridgeSeparator, Bridges, PolygonBridgeSeparator, BRIDGE_CAPABILITY};
use crate::diagnostics::Diagnostics;
use crate::toolpath::{CamPath, CamPoint};

/// Numbers and heights for emitting one operation. Heights, feeds and
/// offsets are in program units.
#[derive(Debug, Clone, PartialEq)]
pub struct EmitParams {
    pub ramp: bool,
    /// Factor from geometry plane units to program units
    pub scale: f64,
    /// Paths carry their own Z (single pass, no bridges)
    pub use_z: bool,
    pub offset_x: f64,
    pub offset_y: f64,
    pub decimal: usize,
    pub top_z: f64,
    pub bot_z: f64,
    pub safe_z: f64,
    pub pass_depth: f64,
    pub plunge_feed: f64,
    pub cut_feed: f64,
    pub rapid_feed: f64,
}

impl EmitParams {
    /// Derives emission parameters for an operation, converting every length
    /// into the program's units.
    pub fn for_operation(
        op: &OperationSpec,
        tool: &ToolSpec,
        material: &MaterialSpec,
        options: &ProgramOptions,
    ) -> Self {
        let units = options.units;
        let top_z = material.top_z(units);
        Self {
            ramp: op.ramp,
            scale: options.plane_scale(),
            use_z: false,
            offset_x: options.offset_x,
            offset_y: options.offset_y,
            decimal: options.decimal as usize,
            top_z,
            bot_z: top_z - Units::convert(op.cut_depth, op.units, units),
            safe_z: material.safe_z(units),
            pass_depth: tool.in_units(tool.pass_depth, units),
            plunge_feed: tool.in_units(tool.plunge_rate, units),
            cut_feed: tool.in_units(tool.cut_rate, units),
            rapid_feed: tool.in_units(tool.rapid_rate, units),
        }
    }

    /// Same parameters for paths whose points carry Z.
    pub fn with_z(mut self) -> Self {
        self.use_z = true;
        self
    }

    fn fixed(&self, value: f64) -> String {
        format!("{:.*}", self.decimal, value)
    }

    fn x(&self, p: &CamPoint) -> f64 {
        p.x * self.scale + self.offset_x
    }

    /// Output Y grows opposite to the geometry plane.
    fn y(&self, p: &CamPoint) -> f64 {
        -p.y * self.scale + self.offset_y
    }

    fn distance(&self, a: &CamPoint, b: &CamPoint) -> f64 {
        Point::new(self.x(a), self.y(a)).distance_to(&Point::new(self.x(b), self.y(b)))
    }

    /// " X.. Y..", plus " Z.." for paths with their own depth.
    fn coords(&self, p: &CamPoint) -> String {
        let mut s = format!(" X{} Y{}", self.fixed(self.x(p)), self.fixed(self.y(p)));
        if self.use_z {
            s.push_str(&format!(" Z{}", self.fixed(p.z * self.scale + self.top_z)));
        }
        s
    }
}

/// Writes G-code for planned paths.
pub struct ProgramEmitter {
    separator: Box<dyn BridgeSeparator>,
}

impl Default for ProgramEmitter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgramEmitter {
    pub fn new() -> Self {
        Self::with_separator(Box::new(PolygonBridgeSeparator))
    }

    pub fn with_separator(separator: Box<dyn BridgeSeparator>) -> Self {
        Self { separator }
    }

    /// Unit selection, absolute positioning and the move to clearance height.
    pub fn program_header(
        &self,
        tool: &ToolSpec,
        material: &MaterialSpec,
        options: &ProgramOptions,
    ) -> String {
        let units = options.units;
        let mut gcode = String::new();
        match units {
            Units::Inch => gcode.push_str("G20         ; Set units to inches\r\n"),
            Units::Mm => gcode.push_str("G21         ; Set units to mm\r\n"),
        }
        gcode.push_str("G90         ; Absolute positioning\r\n");
        gcode.push_str(&format!(
            "G1 Z{} F{}      ; Move to clearance level\r\n",
            material.safe_z(units),
            tool.in_units(tool.rapid_rate, units)
        ));
        gcode
    }

    /// Comment block introducing an operation.
    pub fn operation_block(
        &self,
        index: usize,
        op: &OperationSpec,
        tool: &ToolSpec,
        options: &ProgramOptions,
        path_count: usize,
    ) -> String {
        let units = options.units;
        let mut gcode = String::new();
        gcode.push_str("\r\n;");
        gcode.push_str(&format!("\r\n; Operation:    {}", index));
        gcode.push_str(&format!("\r\n; Name:         {}", op.name));
        gcode.push_str(&format!("\r\n; Type:         {}", op.kind));
        gcode.push_str(&format!("\r\n; Paths:        {}", path_count));
        gcode.push_str(&format!("\r\n; Direction:    {}", op.direction));
        gcode.push_str(&format!(
            "\r\n; Cut Depth:    {}",
            Units::convert(op.cut_depth, op.units, units)
        ));
        gcode.push_str(&format!(
            "\r\n; Pass Depth:   {}",
            tool.in_units(tool.pass_depth, units)
        ));
        gcode.push_str(&format!(
            "\r\n; Plunge rate:  {}",
            tool.in_units(tool.plunge_rate, units)
        ));
        gcode.push_str(&format!(
            "\r\n; Cut rate:     {}",
            tool.in_units(tool.cut_rate, units)
        ));
        gcode.push_str("\r\n;\r\n");
        gcode
    }

    /// Emits the motion lines of `paths`.
    ///
    /// Bridges at or below the pass bottom are ignored. When the separator
    /// is unavailable the paths are cut without bridges and a warning is
    /// recorded once per job.
    pub fn emit_paths(
        &self,
        paths: &[CamPath],
        params: &EmitParams,
        bridges: Option<&Bridges>,
        diagnostics: &mut Diagnostics,
        operation: Option<usize>,
    ) -> String {
        let bridges = bridges
            .filter(|b| !b.geometry.is_empty() && b.tab_z > params.bot_z && !params.use_z);
        let tab_z = bridges.map_or(params.bot_z, |b| b.tab_z);
        let has_bridges = bridges.is_some();

        let rapid = format!(" F{}", params.rapid_feed);
        let retract = format!("; Retract\r\nG1 Z{}{}\r\n", params.fixed(params.safe_z), rapid);
        let retract_for_bridge = format!(
            "; Retract for tab\r\nG1 Z{}{}\r\n",
            params.fixed(tab_z),
            rapid
        );

        let mut gcode = String::new();
        for (path_index, path) in paths.iter().enumerate() {
            if path.is_empty() {
                continue;
            }
            let separated = match bridges {
                Some(b) => self.separate(path, &b.geometry, diagnostics, operation),
                None => vec![path.path.clone()],
            };

            gcode.push_str(&format!("\r\n; Path {}\r\n", path_index));

            let mut current_z = params.safe_z;
            let mut finished_z = params.top_z;
            while finished_z > params.bot_z {
                let next_z = (finished_z - params.pass_depth).max(params.bot_z);
                if current_z < params.safe_z && (!path.safe_to_close || has_bridges) {
                    gcode.push_str(&retract);
                }

                current_z = if has_bridges {
                    finished_z.max(tab_z)
                } else {
                    finished_z
                };
                gcode.push_str("; Rapid to initial position\r\n");
                gcode.push_str(&format!("G1{}{}\r\n", params.coords(&path.path[0]), rapid));
                gcode.push_str(&format!("G1 Z{}\r\n", params.fixed(current_z)));

                let selected: &[Vec<CamPoint>] = if next_z >= tab_z || params.use_z {
                    std::slice::from_ref(&path.path)
                } else {
                    &separated
                };

                for (selected_index, part) in selected.iter().enumerate() {
                    if part.is_empty() {
                        continue;
                    }

                    if !params.use_z {
                        let selected_z = if selected_index % 2 == 1 { tab_z } else { next_z };
                        if selected_z < current_z {
                            let ramped = params.ramp
                                && self.ramp(&mut gcode, part, params, current_z, selected_z);
                            if !ramped {
                                gcode.push_str("; plunge\r\n");
                                gcode.push_str(&format!(
                                    "G1 Z{} F{}\r\n",
                                    params.fixed(selected_z),
                                    params.plunge_feed
                                ));
                            }
                        } else if selected_z > current_z {
                            gcode.push_str(&retract_for_bridge);
                        }
                        current_z = selected_z;
                    }

                    gcode.push_str("; cut\r\n");
                    for (i, p) in part.iter().enumerate().skip(1) {
                        gcode.push_str(&format!("G1{}", params.coords(p)));
                        if i == 1 {
                            gcode.push_str(&format!(" F{}", params.cut_feed));
                        }
                        gcode.push_str("\r\n");
                    }
                }

                finished_z = next_z;
                if params.use_z {
                    break;
                }
            }
            gcode.push_str(&retract);
        }

        debug!("Emitted {} paths", paths.len());
        gcode
    }

    /// Writes a ramp from `from_z` down to `to_z` along the start of `part`,
    /// going forward and back over the same points. Returns false when the
    /// part has no horizontal length to ramp over.
    fn ramp(
        &self,
        gcode: &mut String,
        part: &[CamPoint],
        params: &EmitParams,
        from_z: f64,
        to_z: f64,
    ) -> bool {
        let min_plunge_time = (from_z - to_z) / params.plunge_feed;
        let ideal_distance = params.cut_feed * min_plunge_time;

        let mut end = 1;
        let mut total = 0.0;
        while end < part.len() {
            if total > ideal_distance {
                break;
            }
            total += 2.0 * params.distance(&part[end - 1], &part[end]);
            end += 1;
        }
        if total <= 0.0 {
            return false;
        }

        gcode.push_str("; ramp\r\n");
        let ramp_path: Vec<&CamPoint> = part[..end]
            .iter()
            .chain(part[..end - 1].iter().rev())
            .collect();

        let mut travelled = 0.0;
        for i in 1..ramp_path.len() {
            travelled += params.distance(ramp_path[i - 1], ramp_path[i]);
            let z = from_z + travelled / total * (to_z - from_z);
            gcode.push_str(&format!(
                "G1{} Z{}",
                params.coords(ramp_path[i]),
                params.fixed(z)
            ));
            if i == 1 {
                let feed = (total / min_plunge_time).min(params.cut_feed);
                gcode.push_str(&format!(" F{}", params.fixed(feed)));
            }
            gcode.push_str("\r\n");
        }
        true
    }

    fn separate(
        &self,
        path: &CamPath,
        bridges: &[Vec<Point>],
        diagnostics: &mut Diagnostics,
        operation: Option<usize>,
    ) -> Vec<Vec<CamPoint>> {
        match self.separator.separate(&path.points(), bridges) {
            Ok(parts) => parts
                .into_iter()
                .map(|part| part.into_iter().map(CamPoint::from).collect())
                .collect(),
            Err(e) => {
                diagnostics.warn_once(
                    BRIDGE_CAPABILITY,
                    operation,
                    format!("{}; bridges will be missing", e),
                );
                vec![path.path.clone()]
            }
        }
    }
}
