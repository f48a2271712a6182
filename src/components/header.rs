use leptos::*;
use leptos_router::A;

/// Site chrome: logo plus top navigation.
#[component]
pub fn Header() -> impl IntoView {
    view! {
        <header class="site-header">
            <A href="/" class="logo">{ "Beautique" }</A>
            <nav class="site-nav">
                <A href="/">{ "Home" }</A>
                <A href="/services">{ "Services" }</A>
                <A href="/reviews">{ "Reviews" }</A>
                <A href="/appointment">{ "Book Now" }</A>
            </nav>
        </header>
    }
}
