use yew::prelude::*;

use crate::features::admin::state::{Severity, StatusBanner};

#[derive(Properties, PartialEq)]
pub(crate) struct BannerProps {
    pub banner: StatusBanner,
}

/// Transient status banner under the action buttons.
#[function_component(Banner)]
pub(crate) fn banner(props: &BannerProps) -> Html {
    if !props.banner.visible {
        return html! {};
    }
    let tone = match props.banner.severity {
        Severity::Success => "alert-success",
        Severity::Danger => "alert-error",
    };
    html! {
        <div class={classes!("alert", tone)} role="alert">
            <span>{props.banner.message.clone()}</span>
        </div>
    }
}
