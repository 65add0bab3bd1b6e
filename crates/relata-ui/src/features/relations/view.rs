use relata_api_models::{ChildCollection, CollectionRelation};
use yew::prelude::*;

use crate::endpoints::collection_admin_url;

#[derive(Properties, PartialEq)]
pub(crate) struct RelationListProps {
    pub shop: AttrValue,
    pub relations: Vec<CollectionRelation>,
}

/// Parent/child relation cards, or the empty-state alert.
#[function_component(RelationList)]
pub(crate) fn relation_list(props: &RelationListProps) -> Html {
    if props.relations.is_empty() {
        return html! {
            <div class="alert alert-warning" role="alert">
                {"No parent-child collections found."}
            </div>
        };
    }
    html! {
        <div class="space-y-4">
            { for props.relations.iter().map(|relation| relation_card(&props.shop, relation)) }
        </div>
    }
}

fn relation_card(shop: &str, relation: &CollectionRelation) -> Html {
    html! {
        <div class="card bg-base-100 shadow" key={relation.parent.id.to_string()}>
            <div class="card-body space-y-2">
                <h4 class="card-title">
                    <strong>{relation.parent.title.clone()}</strong>
                    {edit_link(shop, relation.parent.id)}
                </h4>
                { for relation.children.iter().map(|child| child_row(shop, child)) }
            </div>
        </div>
    }
}

fn child_row(shop: &str, child: &ChildCollection) -> Html {
    html! {
        <div class="flex justify-between border-t pt-2" key={child.id.to_string()}>
            <div>
                <strong>{child.title.clone()}</strong>
                <br />
                {"Tag: "}<code>{child.tag.clone()}</code>
                <br />
                {"Redirect: "}<code>{child.redirect.clone()}</code>
            </div>
            {edit_link(shop, child.id)}
        </div>
    }
}

fn edit_link(shop: &str, collection_id: u64) -> Html {
    html! {
        <a
            class="link text-sm"
            href={collection_admin_url(shop, collection_id)}
            target="_blank"
            rel="noreferrer"
        >
            {"Edit"}
        </a>
    }
}
