//! HTML page handlers

use axum::{extract::State, response::Html};

use crate::{
    shell::{
        render::{render_blocks, render_page, render_tools},
        Page,
    },
    AppState,
};

fn static_page(state: &AppState, page: Page) -> Html<String> {
    let body = render_blocks(page.blocks());
    Html(render_page(page, &state.navbar.view(), &body))
}

pub async fn handle_home(State(state): State<AppState>) -> Html<String> {
    static_page(&state, Page::Home)
}

pub async fn handle_about(State(state): State<AppState>) -> Html<String> {
    static_page(&state, Page::About)
}

pub async fn handle_contact(State(state): State<AppState>) -> Html<String> {
    static_page(&state, Page::Contact)
}

pub async fn handle_tools(State(state): State<AppState>) -> Html<String> {
    let body = render_tools(state.gate.view(), &state.controller.snapshot());
    Html(render_page(Page::Tools, &state.navbar.view(), &body))
}
