use maud::{html, Markup};

pub fn card(title: &str, body: Markup) -> Markup {
    html! {
        section class="card" {
            h3 { (title) }
            div class="card-body" {
                (body)
            }
        }
    }
}

pub fn metric(label: &str, value: &str) -> Markup {
    html! {
        div class="card metric" {
            div class="label" { (label) }
            div class="value" { (value) }
        }
    }
}
