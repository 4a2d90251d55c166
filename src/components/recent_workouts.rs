use yew::prelude::*;
use yew::AppHandle;

use crate::recent::ListSurface;
use crate::types::{RecentView, WorkoutRow};

pub const HEADING: &str = "Recent Activity";
pub const EMPTY_MESSAGE: &str = "No workouts logged yet.";

#[derive(Properties, PartialEq)]
pub struct RecentWorkoutsProps {
    pub view: RecentView,
}

#[function_component(RecentWorkouts)]
pub fn recent_workouts(props: &RecentWorkoutsProps) -> Html {
    let body = match &props.view {
        RecentView::Empty => html! { <p>{ EMPTY_MESSAGE }</p> },
        RecentView::Table(rows) => html! {
            <table class="table table-striped table-sm">
                <thead>
                    <tr><th>{ "Date" }</th><th>{ "Exercise" }</th><th>{ "Sets" }</th></tr>
                </thead>
                <tbody>
                    { for rows.iter().map(row) }
                </tbody>
            </table>
        },
    };

    html! {
        <>
            <h3>{ HEADING }</h3>
            { body }
        </>
    }
}

fn row(row: &WorkoutRow) -> Html {
    html! {
        <tr>
            <td>{ row.date.clone() }</td>
            <td>{ row.exercise.clone() }</td>
            <td>{ row.sets.clone() }</td>
        </tr>
    }
}

/// Renders into an existing container. The container keeps its server-side
/// markup until the first successful render replaces it.
pub struct YewListSurface {
    root: web_sys::Element,
    handle: Option<AppHandle<RecentWorkouts>>,
}

impl YewListSurface {
    pub fn new(root: web_sys::Element) -> Self {
        Self { root, handle: None }
    }
}

impl ListSurface for YewListSurface {
    fn show(&mut self, view: &RecentView) {
        let props = RecentWorkoutsProps { view: view.clone() };
        match self.handle.as_mut() {
            Some(handle) => handle.update(props),
            None => {
                let handle = yew::Renderer::<RecentWorkouts>::with_root_and_props(self.root.clone(), props).render();
                self.handle = Some(handle);
            }
        }
    }
}
