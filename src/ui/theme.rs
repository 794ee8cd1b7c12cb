//! Class helpers so pages agree on state-dependent styling. Colours come from
//! the `--kala-*` custom properties set by the shell.

use crate::domain::DemandLevel;

pub fn nav_button(active: bool) -> &'static str {
    if active {
        "kala-nav-btn active"
    } else {
        "kala-nav-btn"
    }
}

pub fn tier_card(selected: bool) -> &'static str {
    if selected {
        "tier-card selected"
    } else {
        "tier-card"
    }
}

pub fn choice_button(active: bool) -> &'static str {
    if active {
        "kala-btn kala-btn-primary"
    } else {
        "kala-btn"
    }
}

pub fn theme_option(active: bool) -> &'static str {
    if active {
        "theme-option active"
    } else {
        "theme-option"
    }
}

pub fn demand_badge(level: DemandLevel) -> &'static str {
    match level {
        DemandLevel::High => "kala-badge badge-high",
        DemandLevel::Medium => "kala-badge badge-medium",
        DemandLevel::Low => "kala-badge badge-low",
    }
}

pub fn confidence_badge(value: f64) -> (&'static str, &'static str) {
    match value {
        v if v >= 0.75 => ("High confidence", "kala-badge badge-high"),
        v if v >= 0.45 => ("Medium confidence", "kala-badge badge-medium"),
        v if v > 0.0 => ("Low confidence", "kala-badge badge-low"),
        _ => ("N/A", "kala-badge badge-neutral"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confidence_thresholds() {
        assert_eq!(confidence_badge(0.85).0, "High confidence");
        assert_eq!(confidence_badge(0.5).0, "Medium confidence");
        assert_eq!(confidence_badge(0.2).0, "Low confidence");
        assert_eq!(confidence_badge(0.0).0, "N/A");
    }
}
