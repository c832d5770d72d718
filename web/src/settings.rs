use crate::theme::Theme;
use crate::utils::*;
use pairs_core::SymbolSet;
use serde::{Deserialize, Serialize};
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct Settings {
    pub sound: bool,
    pub symbol_set: SymbolSet,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sound: true,
            symbol_set: SymbolSet::default(),
        }
    }
}

impl StorageKey for Settings {
    const KEY: &'static str = "pairs:settings";
}

#[derive(Properties, PartialEq)]
pub(crate) struct SettingsProps {
    #[prop_or_default]
    pub open: bool,
    pub settings: Settings,
    pub on_change: Callback<Settings>,
    pub on_close: Callback<()>,
}

#[function_component]
pub(crate) fn SettingsView(props: &SettingsProps) -> Html {
    let theme = use_state(Theme::current);

    let on_sound = {
        let settings = props.settings.clone();
        let on_change = props.on_change.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            on_change.emit(Settings {
                sound: input.checked(),
                ..settings.clone()
            });
        })
    };

    let on_symbol_set = {
        let settings = props.settings.clone();
        let on_change = props.on_change.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            let value = select.value();
            let Some(symbol_set) = SymbolSet::ALL.into_iter().find(|set| set.name() == value) else {
                log::warn!("unknown symbol set: {}", value);
                return;
            };
            on_change.emit(Settings {
                symbol_set,
                ..settings.clone()
            });
        })
    };

    let on_close = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };

    html! {
        <dialog id="settings" open={props.open}>
            <article>
                <h2>{"Settings"}</h2>
                <label>
                    <input type="checkbox" role="switch" checked={props.settings.sound} onchange={on_sound}/>
                    {"Sound"}
                </label>
                <label>
                    {"Symbols"}
                    <select onchange={on_symbol_set}>
                        {
                            for SymbolSet::ALL.into_iter().map(|set| html! {
                                <option value={set.name()} selected={set == props.settings.symbol_set}>
                                    {format!("{} {}", set.glyph(pairs_core::Symbol(0)), set.name())}
                                </option>
                            })
                        }
                    </select>
                </label>
                <ul>
                    {
                        for Theme::CHOICES.into_iter().map(|choice| {
                            let current = theme.clone();
                            let onclick = Callback::from(move |e: MouseEvent| {
                                e.prevent_default();
                                Theme::apply(choice);
                                current.set(choice);
                            });
                            html! {
                                <li>
                                    <a href="#" class={(*theme == choice).then_some("current")} {onclick}>
                                        {Theme::label(choice)}
                                    </a>
                                </li>
                            }
                        })
                    }
                </ul>
                <footer>
                    <button onclick={on_close}>{"Close"}</button>
                </footer>
            </article>
        </dialog>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"sound":false}"#).unwrap();

        assert!(!settings.sound);
        assert_eq!(settings.symbol_set, SymbolSet::Animals);
    }

    #[test]
    fn storage_key_is_namespaced() {
        assert_eq!(<Settings as StorageKey>::KEY, "pairs:settings");
    }
}
