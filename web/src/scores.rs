use crate::utils::*;
use pairs_core::{HighScoreTable, Level};
use yew::prelude::*;

impl StorageKey for HighScoreTable {
    const KEY: &'static str = "pairs:scores";
}

#[derive(Properties, PartialEq)]
pub(crate) struct HighScoresProps {
    pub level: Level,
    pub scores: HighScoreTable,
    /// Rank to highlight, set right after submitting a record.
    #[prop_or_default]
    pub highlight: Option<usize>,
    pub on_select: Callback<Level>,
    pub on_clear: Callback<Level>,
    pub on_back: Callback<()>,
}

#[function_component]
pub(crate) fn HighScoresView(props: &HighScoresProps) -> Html {
    let level = props.level;
    let entries = props.scores.entries(level);

    let tabs = Level::ALL.into_iter().map(|tab| {
        let on_select = props.on_select.clone();
        let onclick = Callback::from(move |_: MouseEvent| on_select.emit(tab));
        html! {
            <button class={(tab == level).then_some("current")} {onclick}>{tab.name()}</button>
        }
    });

    let on_clear = {
        let on_clear = props.on_clear.clone();
        Callback::from(move |_: MouseEvent| on_clear.emit(level))
    };
    let on_back = {
        let on_back = props.on_back.clone();
        Callback::from(move |_: MouseEvent| on_back.emit(()))
    };

    html! {
        <section class="high-scores">
            <h2>{"High scores"}</h2>
            <nav>{ for tabs }</nav>
            if entries.is_empty() {
                <p>{"No records yet."}</p>
            } else {
                <ol>
                    {
                        for entries.iter().enumerate().map(|(rank, entry)| html! {
                            <li class={(props.highlight == Some(rank)).then_some("new")}>
                                <span>{entry.name.clone()}</span>
                                <span>{format!("{} moves", entry.moves)}</span>
                                <small>{entry.recorded_at.date_naive().to_string()}</small>
                            </li>
                        })
                    }
                </ol>
            }
            <footer>
                <button onclick={on_back}>{"Menu"}</button>
                <button class="secondary" disabled={entries.is_empty()} onclick={on_clear}>{"Clear"}</button>
            </footer>
        </section>
    }
}
