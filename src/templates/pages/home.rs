// templates/pages/home.rs

use crate::templates::desktop_layout;
use maud::{html, Markup};

pub fn home_page(models: &[String], selected: Option<&str>) -> Markup {
    desktop_layout(
        "Vehicle Price Analytics",
        html! {
            main class="container" {
                h1 { "Vehicle Price Analytics" }
                (model_picker(models, selected))
            }
        },
    )
}

pub fn model_picker(models: &[String], selected: Option<&str>) -> Markup {
    html! {
        form
            action="/analyze"
            method="get"
            class="card"
            style="display: flex; gap: 10px; align-items: center;"
        {
            label for="model" { "Select Model" }
            select name="model" id="model" required style="padding: 8px; font-size: 16px;" {
                @for model in models {
                    option value=(model) selected[selected == Some(model.as_str())] { (model) }
                }
            }
            button type="submit" style="padding: 8px 16px; font-size: 16px; cursor: pointer;" {
                "Analyze Market"
            }
        }
    }
}
