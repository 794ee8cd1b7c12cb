use dioxus::prelude::*;

use crate::{
    domain::{format_inr, format_inr_opt, PriceCandidate},
    infra::estimator::Estimate,
    ui::{components::stat_card::StatCard, theme},
};

/// Recommendation, price tiers, cost breakdown and market insight for one
/// estimate. Tier clicks are reported through `on_select`.
#[component]
pub fn PricingPanel(
    estimate: Estimate,
    selected: Option<f64>,
    on_select: EventHandler<f64>,
    on_refresh: EventHandler<()>,
) -> Element {
    let rec = estimate.data.clone();
    let (confidence_label, confidence_class) = theme::confidence_badge(rec.confidence);
    let confidence_pct = rec.confidence_pct();
    let candidates = rec.candidate_prices();
    let cost_rows: Vec<(String, String)> = rec
        .cost_analysis
        .lines()
        .iter()
        .map(|line| (line.label(), format_inr(line.amount)))
        .collect();
    let has_costs = !rec.cost_analysis.is_empty();
    let cost_total = format_inr(rec.cost_analysis.total());
    let market = rec.market_analysis.clone();
    let competitor_note = match (rec.competitor_min(), rec.competitor_max()) {
        (Some(low), Some(high)) => format!("Competitors: {} – {}", format_inr(low), format_inr(high)),
        _ => "No competitor prices reported".to_string(),
    };

    rsx! {
        div { class: "kala-stack",
            if estimate.is_fallback() {
                div { class: "kala-notice",
                    "The pricing service is unreachable, so these figures are sample data. Refresh to try again."
                }
            }

            section { class: "kala-card",
                div { class: "kala-spread",
                    div {
                        span { class: "kala-label", "Recommended price" }
                        p { class: "kala-price", style: "margin: 0;", "{format_inr(rec.recommended_price)}" }
                        p { class: "kala-muted", style: "margin: 0;",
                            "Range {format_inr(rec.price_range.minimum)} – {format_inr(rec.price_range.maximum)}"
                        }
                    }
                    div { class: "kala-row",
                        span { class: confidence_class, "{confidence_label} · {confidence_pct}%" }
                        button { class: "kala-btn", onclick: move |_| on_refresh.call(()), "Refresh" }
                    }
                }
            }

            section { class: "kala-card",
                h2 { "Choose your price" }
                div { class: "kala-grid",
                    for candidate in candidates {
                        TierCard {
                            candidate,
                            selected: selected == Some(candidate.price),
                            on_select,
                        }
                    }
                }
                p { class: "kala-muted",
                    "Selected: {format_inr_opt(selected)}"
                }
            }

            div { class: "kala-grid-2",
                section { class: "kala-card",
                    h2 { "Cost breakdown" }
                    if !has_costs {
                        p { class: "kala-muted", "No cost breakdown was provided." }
                    }
                    table { class: "kala-table",
                        tbody {
                            for (label, amount) in cost_rows {
                                tr {
                                    td { "{label}" }
                                    td { "{amount}" }
                                }
                            }
                            tr { class: "total",
                                td { "Total" }
                                td { "{cost_total}" }
                            }
                        }
                    }
                }

                section { class: "kala-card",
                    h2 { "Market insight" }
                    div { class: "kala-stack",
                        StatCard {
                            title: "Average market price".to_string(),
                            value: format_inr(market.average_market_price),
                            description: Some(competitor_note),
                        }
                        div { class: "kala-row",
                            span { class: theme::demand_badge(market.demand_level),
                                "Demand: {market.demand_level.label()}"
                            }
                            span { class: "kala-badge badge-neutral",
                                "Trend: {market.seasonal_trend.arrow()} {market.seasonal_trend.label()}"
                            }
                        }
                    }
                }
            }

            if !rec.reasoning.is_empty() {
                section { class: "kala-card",
                    h2 { "Why this price" }
                    ul { class: "kala-list",
                        for reason in rec.reasoning.iter() {
                            li { "{reason}" }
                        }
                    }
                }
            }

            if !rec.recommendations.is_empty() {
                section { class: "kala-card",
                    h2 { "Ways to earn more" }
                    ul { class: "kala-list",
                        for tip in rec.recommendations.iter() {
                            li {
                                strong { "{tip.kind.label()}: " }
                                "{tip.suggestion}"
                                if !tip.impact.is_empty() {
                                    span { class: "kala-muted", " ({tip.impact})" }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn TierCard(candidate: PriceCandidate, selected: bool, on_select: EventHandler<f64>) -> Element {
    let price = candidate.price;
    rsx! {
        button {
            class: theme::tier_card(selected),
            onclick: move |_| on_select.call(price),
            span { class: "kala-label", "{candidate.tier.label()}" }
            div { class: "tier-price", "{format_inr(price)}" }
            div { class: "tier-hint", "{candidate.tier.hint()}" }
        }
    }
}
