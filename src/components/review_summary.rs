use leptos::*;

/// Summary card: review count, overall average, and the per-service
/// averages (only services that actually have reviews).
#[component]
pub fn ReviewSummary(
    total: usize,
    average: String,
    service_averages: Vec<(String, String)>,
) -> impl IntoView {
    view! {
        <div class="summary-card">
            <h2 class="summary-title">{ "Summary" }</h2>
            <div class="summary-stats">
                <div class="stat-item">
                    <span class="stat-value">{ total }</span>
                    <span class="stat-label">{ "Total Reviews" }</span>
                </div>
                <div class="stat-item">
                    <span class="stat-value">{ format!("{average} ⭐") }</span>
                    <span class="stat-label">{ "Average Rating" }</span>
                </div>
            </div>
            {(!service_averages.is_empty()).then(|| view! {
                <div class="service-averages">
                    <h3>{ "Service Ratings" }</h3>
                    {service_averages.into_iter().map(|(service, avg)| view! {
                        <div class="service-avg-item">
                            <span>{ service }</span>
                            <span class="avg-rating">{ format!("{avg} ⭐") }</span>
                        </div>
                    }).collect_view()}
                </div>
            })}
        </div>
    }
}
