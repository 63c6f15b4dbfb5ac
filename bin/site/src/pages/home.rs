//! Home page component.

use leptos::prelude::*;

/// The home page component.
#[component]
pub fn HomePage() -> impl IntoView {
    view! {
        <div class="home-page">
            <section class="hero">
                <h1>"Reykjavík Excursions"</h1>
                <p>"Day tours, airport transfers and Northern Lights hunts across Iceland."</p>
                <a href="#tours" class="cta-button">"Browse tours"</a>
            </section>
            <section id="tours" class="tour-categories">
                <h2>"Popular tours"</h2>
                <p>"Questions before you book? Our assistant is in the corner, ready to help."</p>
            </section>
        </div>
    }
}
