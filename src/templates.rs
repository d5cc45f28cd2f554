use maud::{DOCTYPE, Markup, html};

use crate::{
    catalog::{DURATIONS, GENRES},
    models::{MovieRecord, SearchFilter},
};

const TAILWIND_CDN: &str = "https://cdn.tailwindcss.com";

pub fn index_page() -> String {
    page(
        "Cinedex",
        html! {
            div class="max-w-2xl mx-auto px-6 py-12 space-y-8" {
                div class="bg-white shadow rounded-lg p-8" {
                    h1 class="text-3xl font-bold text-gray-900" { "Cinedex" }
                    p class="mt-2 text-gray-600" { "Search the movie index or add a movie by its TMDB id." }

                    form class="mt-8 space-y-4" method="get" action="/search" {
                        (text_input("name", "Name contains", None))
                        (text_input("year", "Release year", None))
                        (text_input("external_id", "External id", None))

                        div {
                            label class="block text-sm font-medium text-gray-700" for="genre" { "Genre" }
                            select class="mt-2 w-full rounded-md border border-gray-300 px-3 py-2" name="genre" id="genre" {
                                option value="" { "Any genre" }
                                @for genre in GENRES {
                                    option value=(genre) { (genre) }
                                }
                            }
                        }

                        div {
                            label class="block text-sm font-medium text-gray-700" for="duration" { "Minimum runtime" }
                            select class="mt-2 w-full rounded-md border border-gray-300 px-3 py-2" name="duration" id="duration" {
                                option value="" { "Any length" }
                                @for (minutes, label) in DURATIONS {
                                    option value=(minutes) { (label) " or more" }
                                }
                            }
                        }

                        label class="flex items-center gap-2 text-sm text-gray-700" {
                            input type="checkbox" name="all" value="on";
                            "Show everything in the index"
                        }

                        button class="w-full rounded-md bg-blue-600 px-4 py-2 font-semibold text-white hover:bg-blue-700" type="submit" { "Search" }
                    }
                }

                div class="bg-white shadow rounded-lg p-8" {
                    h2 class="text-xl font-semibold text-gray-900" { "Add a movie" }
                    form class="mt-6 space-y-4" method="post" action="/movies" {
                        (text_input("external_id", "TMDB id", Some("e.g. 603")))
                        button class="w-full rounded-md bg-green-600 px-4 py-2 font-semibold text-white hover:bg-green-700" type="submit" { "Add to index" }
                    }
                }
            }
        },
    )
}

pub fn results_page(filter: &SearchFilter, movies: &[MovieRecord]) -> String {
    page(
        "Search results",
        html! {
            div class="max-w-4xl mx-auto px-6 py-10" {
                div class="flex items-start justify-between gap-6" {
                    div {
                        h1 class="text-3xl font-bold text-gray-900" { "Search results" }
                        p class="mt-2 text-gray-600" { (describe_filter(filter)) }
                    }
                    a class="text-sm text-blue-600 hover:text-blue-800" href="/" { "New search" }
                }

                @if movies.is_empty() {
                    div class="mt-10 bg-white shadow rounded-lg p-8" {
                        p class="text-gray-600" { "No movies found." }
                    }
                } @else {
                    div class="mt-10 space-y-4" {
                        @for movie in movies {
                            (movie_card(movie))
                        }
                    }
                }
            }
        },
    )
}

pub fn detail_page(movie: &MovieRecord) -> String {
    page(
        &movie.name,
        html! {
            div class="max-w-3xl mx-auto px-6 py-10" {
                div class="bg-white shadow rounded-lg p-8" {
                    div class="flex items-start gap-6" {
                        @if let Some(cover) = &movie.cover_url {
                            img class="w-40 rounded-md" src=(cover) alt=(movie.name);
                        }
                        div {
                            h1 class="text-3xl font-bold text-gray-900" {
                                (movie.name)
                                @if let Some(year) = movie.year {
                                    span class="ml-2 font-normal text-gray-500" { "(" (year) ")" }
                                }
                            }
                            @if let Some(genres) = &movie.genres {
                                p class="mt-2 text-sm text-gray-500" { (genres) }
                            }
                            @if !movie.overview.is_empty() {
                                p class="mt-4 text-gray-700" { (movie.overview) }
                            }
                        }
                    }

                    dl class="mt-8 grid grid-cols-2 gap-x-6 gap-y-3 text-sm" {
                        (detail_row("External id", Some(&movie.external_id)))
                        (detail_row("Cross-reference", movie.alternate_id.as_deref()))
                        (detail_row("Language", non_empty(&movie.language)))
                        (detail_row("Runtime", movie.duration_minutes.map(|m| format!("{m} min")).as_deref()))
                        (detail_row("Certification", movie.certification.as_deref()))
                    }

                    form class="mt-8" method="post" action="/movies" {
                        input type="hidden" name="external_id" value=(movie.external_id);
                        button class="rounded-md bg-green-600 px-4 py-2 font-semibold text-white hover:bg-green-700" type="submit" { "Add to index" }
                    }

                    a class="mt-6 inline-block text-sm text-blue-600 hover:text-blue-800" href="/" { "Back to search" }
                }
            }
        },
    )
}

pub fn error_page(message: String) -> String {
    page(
        "Error",
        html! {
            div class="max-w-xl mx-auto px-6 py-12" {
                div class="bg-white shadow rounded-lg p-8" {
                    h1 class="text-2xl font-bold text-gray-900" { "Error" }
                    p class="mt-4 text-gray-700" { (message) }
                    a class="mt-6 inline-block text-blue-600 hover:text-blue-800" href="/" { "Back" }
                }
            }
        },
    )
}

fn page(title: &str, body: Markup) -> String {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) }
                script src=(TAILWIND_CDN) {}
            }
            body class="min-h-screen bg-gray-50" { (body) }
        }
    }
    .into_string()
}

fn text_input(name: &str, label: &str, placeholder: Option<&str>) -> Markup {
    html! {
        div {
            label class="block text-sm font-medium text-gray-700" for=(name) { (label) }
            input class="mt-2 w-full rounded-md border border-gray-300 px-3 py-2 focus:border-blue-500 focus:outline-none focus:ring-1 focus:ring-blue-500"
                name=(name) id=(name) placeholder=[placeholder];
        }
    }
}

fn movie_card(movie: &MovieRecord) -> Markup {
    let href = format!("/movies/{}", urlencoding::encode(&movie.external_id));
    html! {
        div class="bg-white shadow rounded-lg p-6" {
            div class="flex items-start gap-4" {
                @if let Some(thumb) = &movie.thumb_url {
                    img class="w-16 rounded" src=(thumb) alt=(movie.name);
                }
                div {
                    h2 class="text-xl font-semibold text-gray-900" {
                        a class="hover:text-blue-700" href=(href) { (movie.name) }
                        @if let Some(year) = movie.year {
                            span class="ml-2 font-normal text-gray-500" { "(" (year) ")" }
                        }
                    }
                    @if let Some(genres) = &movie.genres {
                        p class="mt-1 text-sm text-gray-500" { (genres) }
                    }
                    @if !movie.overview.is_empty() {
                        p class="mt-2 text-sm text-gray-700" { (movie.overview) }
                    }
                }
            }
        }
    }
}

fn detail_row(label: &str, value: Option<&str>) -> Markup {
    html! {
        @if let Some(value) = value {
            dt class="font-medium text-gray-500" { (label) }
            dd class="text-gray-900" { (value) }
        }
    }
}

fn non_empty(value: &str) -> Option<&str> {
    (!value.is_empty()).then_some(value)
}

fn describe_filter(filter: &SearchFilter) -> String {
    if filter.match_all || filter.is_empty() {
        return "All indexed movies".to_string();
    }

    let mut parts = Vec::new();
    if let Some(name) = &filter.name_contains {
        parts.push(format!("name: {name}"));
    }
    if let Some(year) = filter.year {
        parts.push(format!("year: {year}"));
    }
    if let Some(id) = &filter.external_id {
        parts.push(format!("id: {id}"));
    }
    if let Some(genre) = &filter.genre {
        parts.push(format!("genre: {genre}"));
    }
    if let Some(minutes) = filter.duration_minutes {
        parts.push(format!("at least {minutes} min"));
    }
    parts.join(" · ")
}
