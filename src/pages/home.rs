use leptos::*;
use leptos_router::A;

/// Landing page. The original site's parallax and carousel effects are
/// deliberately reduced to static markup here.
#[component]
pub fn HomePage() -> impl IntoView {
    let stats = [
        ("5000+", "Happy Clients"),
        ("15", "Years Experience"),
        ("100+", "Awards"),
        ("98%", "Satisfaction"),
    ];
    let features = [
        ("✂️", "Expert Stylists", "Trained professionals who listen first"),
        ("💆", "Premium Products", "We use only the finest products for your hair"),
        ("✨", "Modern Techniques", "Latest trends and techniques in cosmetology"),
        ("💅", "Personalized Service", "Tailored to your unique style and needs"),
    ];

    view! {
        <div class="home-page">
            <section class="hero">
                <h1>{ "Beautique Salon" }</h1>
                <p class="hero-tagline">{ "Where your hair gets the care it deserves" }</p>
                <div class="hero-actions">
                    <A href="/services" class="cta-button">{ "Browse Services" }</A>
                    <A href="/appointment" class="cta-button secondary">{ "Book an Appointment" }</A>
                </div>
            </section>

            <section class="stats">
                {stats.iter().map(|(number, label)| view! {
                    <div class="stat">
                        <span class="stat-number">{ *number }</span>
                        <span class="stat-label">{ *label }</span>
                    </div>
                }).collect_view()}
            </section>

            <section class="features">
                {features.iter().map(|(icon, title, desc)| view! {
                    <div class="feature-card">
                        <span class="feature-icon">{ *icon }</span>
                        <h3>{ *title }</h3>
                        <p>{ *desc }</p>
                    </div>
                }).collect_view()}
            </section>
        </div>
    }
}
