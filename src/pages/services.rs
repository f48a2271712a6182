use crate::models::catalog::CATEGORIES;
use leptos::*;
use leptos_router::A;

#[derive(Debug, Clone, PartialEq, Eq)]
struct CartItem {
    name: String,
    price: u32,
}

/// Service menu with the add-to-cart flow. The cart is session-only
/// state; it is never persisted.
#[component]
pub fn ServicesPage() -> impl IntoView {
    let (cart, set_cart) = create_signal(Vec::<CartItem>::new());
    let total = move || cart.get().iter().map(|item| item.price).sum::<u32>();

    view! {
        <div class="services-page">
            <h1>{ "Our Services" }</h1>
            <div class="categories">
                {CATEGORIES.iter().map(|category| view! {
                    <div class="category-card" id=category.id>
                        <h2>{ category.title }</h2>
                        <ul class="service-list">
                            {category.services.iter().map(|service| {
                                let name = service.name.to_string();
                                let price = service.price;
                                view! {
                                    <li class="service-row">
                                        <div class="service-info">
                                            <span class="service-name">{ service.name }</span>
                                            <span class="service-desc">{ service.info }</span>
                                        </div>
                                        <span class="service-price">{ format!("${price}") }</span>
                                        <button
                                            class="add-to-cart-btn"
                                            on:click=move |_| set_cart.update(|items| {
                                                items.push(CartItem { name: name.clone(), price });
                                            })
                                        >{ "Add" }</button>
                                    </li>
                                }
                            }).collect_view()}
                        </ul>
                    </div>
                }).collect_view()}
            </div>

            <aside class="cart">
                <h2>{ "Your Selection" }</h2>
                {move || {
                    let items = cart.get();
                    if items.is_empty() {
                        view! { <p class="cart-empty">{ "Nothing selected yet." }</p> }.into_view()
                    } else {
                        items.into_iter().enumerate().map(|(index, item)| view! {
                            <div class="cart-item">
                                <span>{ item.name.clone() }</span>
                                <span>{ format!("${}", item.price) }</span>
                                <button
                                    class="remove-item-btn"
                                    on:click=move |_| set_cart.update(|items| {
                                        if index < items.len() {
                                            items.remove(index);
                                        }
                                    })
                                >{ "Remove" }</button>
                            </div>
                        }).collect_view()
                    }
                }}
                <div class="cart-total">
                    <span>{ "Total" }</span>
                    <span>{ move || format!("${}", total()) }</span>
                </div>
                <A href="/appointment" class="cta-button">{ "Book an Appointment" }</A>
            </aside>
        </div>
    }
}
