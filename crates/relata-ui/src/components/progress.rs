use yew::prelude::*;

use crate::features::admin::state::ProgressState;

#[derive(Properties, PartialEq)]
pub(crate) struct ProgressBarProps {
    pub progress: ProgressState,
}

/// Sync progress bar with a textual percentage.
#[function_component(ProgressBar)]
pub(crate) fn progress_bar(props: &ProgressBarProps) -> Html {
    if !props.progress.visible {
        return html! {};
    }
    let percent = props.progress.percent;
    html! {
        <div class="flex items-center gap-2">
            <progress class="progress progress-success w-56" value={percent.to_string()} max="100" />
            <span class="text-sm tabular-nums">{format!("{percent}%")}</span>
        </div>
    }
}
