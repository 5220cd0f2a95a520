pub mod json;
pub mod text;

pub fn format_f64_2(v: f64) -> String {
    format!("{:.2}", v)
}

pub fn format_f64_4(v: f64) -> String {
    format!("{:.4}", v)
}

pub fn format_pct(fraction: f64) -> String {
    format!("{:.2}%", fraction * 100.0)
}

pub fn rule(width: usize) -> String {
    "=".repeat(width)
}
