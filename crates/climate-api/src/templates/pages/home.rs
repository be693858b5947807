use maud::{html, Markup};

use crate::templates::layouts::{base, PageConfig};

/// Routes listed on the welcome page, relative to the API base
const ROUTES: &[(&str, &str)] = &[
    (
        "/api/v1.0/precipitation",
        "Precipitation for every date in the dataset",
    ),
    ("/api/v1.0/stations", "Stations present in the dataset"),
    (
        "/api/v1.0/tobs",
        "Last year of temperatures for the most active station",
    ),
    (
        "/api/v1.0/temperature?start=<start_date>&end=<end_date>",
        "Daily min, average and max temperature, end date optional",
    ),
];

pub fn home_page(api_base: &str) -> Markup {
    let config = PageConfig {
        title: "Welcome to The Climate API!",
        api_base,
    };

    base(&config, content(api_base))
}

fn content(api_base: &str) -> Markup {
    html! {
        div class="content" {
            h2 class="subtitle" { "Available Routes" }
            table class="table is-fullwidth is-striped" {
                thead {
                    tr {
                        th { "Route" }
                        th { "Description" }
                    }
                }
                tbody {
                    @for (route, description) in ROUTES {
                        tr {
                            td {
                                a href={ (api_base) (route) } { code { (route) } }
                            }
                            td { (description) }
                        }
                    }
                }
            }
            p class="is-size-7" {
                "Dates use the YYYY-MM-DD format. Every route is also served without the "
                code { "/api/v1.0" }
                " prefix."
            }
        }
    }
}
