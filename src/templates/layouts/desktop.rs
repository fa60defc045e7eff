use maud::{html, Markup, DOCTYPE};

const STYLE: &str = r#"
body { font-family: system-ui, sans-serif; margin: 0; color: #1f2937; background: #f9fafb; }
header { display: flex; align-items: center; gap: 0.75rem; padding: 0.75rem 1.5rem; background: #fff; box-shadow: 0 1px 3px rgba(0,0,0,.08); }
header nav ul { display: flex; gap: 1rem; list-style: none; margin: 0 0 0 auto; padding: 0; }
main.container { max-width: 960px; margin: 2rem auto; padding: 0 1rem; }
.card { background: #fff; border: 1px solid #e5e7eb; border-radius: 8px; padding: 1rem 1.25rem; margin-bottom: 1rem; }
.metrics { display: flex; gap: 1rem; flex-wrap: wrap; }
.metric { flex: 1 1 200px; }
.metric .label { font-size: 0.85rem; color: #6b7280; }
.metric .value { font-size: 1.5rem; font-weight: 600; }
.alert { padding: 0.75rem 1rem; border-radius: 6px; margin-bottom: 1rem; }
.alert-success { background: #dcfce7; color: #166534; }
.alert-error { background: #fee2e2; color: #991b1b; }
.alert-info { background: #dbeafe; color: #1e40af; }
table { width: 100%; border-collapse: collapse; }
th, td { text-align: left; padding: 0.4rem 0.6rem; border-bottom: 1px solid #e5e7eb; }
th { font-size: 0.8rem; text-transform: uppercase; color: #6b7280; }
td.num { text-align: right; font-variant-numeric: tabular-nums; }
"#;

pub fn desktop_layout(title: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                style { (maud::PreEscaped(STYLE)) }
            }
            body {
                header {
                    svg
                        xmlns="http://www.w3.org/2000/svg"
                        width="24"
                        height="24"
                        viewBox="0 0 24 24"
                        fill="none"
                        stroke="#524ed2"
                        stroke-width="2"
                        stroke-linecap="round"
                        stroke-linejoin="round"
                    {
                        path stroke="none" d="M0 0h24v24H0z" fill="none" {}
                        path d="M5 17a2 2 0 1 0 4 0a2 2 0 1 0 -4 0" {}
                        path d="M15 17a2 2 0 1 0 4 0a2 2 0 1 0 -4 0" {}
                        path d="M5 17h-2v-6l2 -5h9l4 5h1a2 2 0 0 1 2 2v4h-2m-4 0h-6m-6 -6h15m-6 0v-5" {}
                    }
                    h3 { "Vehicle Price Analytics" }
                    nav {
                        ul {
                            li { a href="/" { "Home" } }
                        }
                    }
                }
                (content)
            }
        }
    }
}
