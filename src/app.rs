/// Main application entry point for the Beautique salon site.
/// Wires the page routes together under the shared header.
use crate::components::header::Header;
use crate::pages::appointment::AppointmentPage;
use crate::pages::home::HomePage;
use crate::pages::reviews::ReviewsPage;
use crate::pages::services::ServicesPage;
use leptos::*;
use leptos_meta::*;
use leptos_router::*;

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    view! {
        <Stylesheet id="leptos" href="/pkg/beautique.css"/>
        <Title text="Beautique Salon"/>
        <Router>
            <Header/>
            <main>
                <Routes>
                    <Route path="/" view=HomePage/>
                    <Route path="/services" view=ServicesPage/>
                    <Route path="/reviews" view=ReviewsPage/>
                    <Route path="/appointment" view=AppointmentPage/>
                    <Route path="/*any" view=NotFound/>
                </Routes>
            </main>
        </Router>
    }
}

#[component]
fn NotFound() -> impl IntoView {
    view! { <h1>{ "404 - Page Not Found" }</h1> }
}
