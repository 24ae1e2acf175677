/// Z-score with four decimals, right-aligned so signs line up
pub fn z_score(z: f64) -> String {
    format!("{:>8.4}", z)
}

/// Relative standard deviation, already scaled to percent
pub fn percent(pct: f64) -> String {
    format!("{:>6}%", short(pct))
}

pub fn short(n: f64) -> String {
    let n_abs = n.abs();

    if n_abs < 10.0 {
        format!("{:.4}", n)
    } else if n_abs < 100.0 {
        format!("{:.3}", n)
    } else if n_abs < 1000.0 {
        format!("{:.2}", n)
    } else if n_abs < 10000.0 {
        format!("{:.1}", n)
    } else {
        format!("{:.0}", n)
    }
}

/// Pads `name` to the width of the longest label in a listing
pub fn label(name: &str, width: usize) -> String {
    format!("{:<width$}", format!("{}:", name), width = width + 1)
}
