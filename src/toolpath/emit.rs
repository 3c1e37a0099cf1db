use super::types::Polyline;

/// Motion settings for program emission, already validated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionSettings {
    pub feed_rate: f64,
    pub seek_rate: f64,
    pub cut_depth: f64,
    pub safe_height: f64,
    pub tool_diameter: f64,
    pub tolerance: f64,
    pub passes: u32,
}

/// Format a number with at most 4 decimals, trimming trailing zeros and -0
fn f(n: f64) -> String {
    let s = format!("{:.4}", n);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" {
        "0".to_string()
    } else {
        s.to_string()
    }
}

/// Depth of pass `pass` (1-based): equal steps down to `-cut_depth`.
pub fn pass_depth(settings: &MotionSettings, pass: u32) -> f64 {
    -settings.cut_depth * pass as f64 / settings.passes as f64
}

/// Emit the program for `polylines` as individual G-code lines.
pub fn emit_program(polylines: &[Polyline], settings: &MotionSettings) -> Vec<String> {
    let safe = f(settings.safe_height);
    let feed = f(settings.feed_rate);
    let seek = f(settings.seek_rate);

    let mut lines = vec![
        "; svg-gcode-gateway".to_string(),
        format!(
            "; tool diameter {} mm, tolerance {} mm, {} pass(es), {} path(s)",
            f(settings.tool_diameter),
            f(settings.tolerance),
            settings.passes,
            polylines.len()
        ),
        "G21 ; millimetres".to_string(),
        "G90 ; absolute positioning".to_string(),
        format!("G0 Z{} F{}", safe, seek),
    ];

    for pass in 1..=settings.passes {
        let z = f(pass_depth(settings, pass));
        if settings.passes > 1 {
            lines.push(format!("; pass {} of {} at Z{}", pass, settings.passes, z));
        }

        for polyline in polylines {
            let mut points = polyline.points.iter();
            let Some(start) = points.next() else {
                continue;
            };

            lines.push(format!("G0 X{} Y{} F{}", f(start.x), f(start.y), seek));
            lines.push(format!("G1 Z{} F{}", z, feed));

            for (i, p) in points.enumerate() {
                if i == 0 {
                    lines.push(format!("G1 X{} Y{} F{}", f(p.x), f(p.y), feed));
                } else {
                    lines.push(format!("G1 X{} Y{}", f(p.x), f(p.y)));
                }
            }

            lines.push(format!("G0 Z{}", safe));
        }
    }

    lines.push(format!("G0 Z{}", safe));
    lines.push("M2".to_string());
    lines
}
