//! Public landing page. Each section carries the id the navbar scroll-spy
//! measures.

use leptos::prelude::*;

const NEWS: [(&str, &str); 3] = [
    ("Kharif input subsidy window opens", "Applications for seed and fertilizer support are now open for the kharif season."),
    ("Drip irrigation scheme extended", "The micro-irrigation subsidy has been extended for another financial year."),
    ("Soil health card camps", "Village-level soil testing camps are scheduled across participating districts."),
];

const FAQ: [(&str, &str); 4] = [
    (
        "Who can apply for subsidies?",
        "Registered farmers with a completed profile can apply for schemes they are eligible for.",
    ),
    (
        "Which documents do I need?",
        "Most schemes ask for land proof, a PAN card, an Aadhaar card and a recent photo. Upload them once on your profile.",
    ),
    (
        "Can I log in with my mobile number?",
        "Yes. Choose Login with Mobile and enter the OTP sent to your registered number.",
    ),
    ("I forgot my password. What now?", "Use Forgot Password on the login screen to reset it with an email OTP."),
];

#[component]
pub fn HomePage() -> impl IntoView {
    view! {
        <div class="home-page">
            <section id="home" class="home-section home-hero">
                <h1>"Government support for every farm"</h1>
                <p>"Discover agricultural subsidies, keep your documents in one place, and track your applications."</p>
                <div class="home-hero__actions">
                    <a class="btn btn--primary" href="/subsidies">"Browse Subsidies"</a>
                    <a class="btn" href="/signup">"Create an Account"</a>
                </div>
            </section>

            <section id="subsidy" class="home-section">
                <h2>"Subsidies"</h2>
                <p>
                    "Schemes cover seeds, fertilizer, irrigation, machinery and crop insurance. Each listing shows the "
                    "amount, the application window, eligibility and the documents required."
                </p>
                <a class="btn btn--primary" href="/subsidies">"View all subsidies"</a>
            </section>

            <section id="news" class="home-section">
                <h2>"News"</h2>
                <div class="news-grid">
                    {NEWS
                        .into_iter()
                        .map(|(title, body)| {
                            view! {
                                <article class="news-card">
                                    <h3>{title}</h3>
                                    <p>{body}</p>
                                </article>
                            }
                        })
                        .collect_view()}
                </div>
            </section>

            <section id="about" class="home-section">
                <h2>"About Us"</h2>
                <p>
                    "The portal connects farmers, agriculture officers and subsidy providers. Farmers apply, "
                    "officers verify, and providers publish and fund schemes."
                </p>
            </section>

            <section id="faq" class="home-section">
                <h2>"FAQ"</h2>
                {FAQ
                    .into_iter()
                    .map(|(question, answer)| {
                        view! {
                            <details class="faq-item">
                                <summary>{question}</summary>
                                <p>{answer}</p>
                            </details>
                        }
                    })
                    .collect_view()}
            </section>

            <section id="contact" class="home-section">
                <h2>"Contact"</h2>
                <p>"Helpline: 1800-180-1551 (toll free)"</p>
                <p>"Email: support@krishi-portal.example"</p>
            </section>
        </div>
    }
}
