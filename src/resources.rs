//! Resource namespaces. Each method forwards its params to
//! [`ClientInner::invoke`](crate::ClientInner::invoke) under a fixed RPC method name.

use serde_json::Value;

use crate::client::Client;
use crate::http::Transport;
use crate::jsonrpc::Params;
use crate::Result;

macro_rules! namespace {
    ($(#[$doc:meta])* $name:ident { $($func:ident => $method:literal),+ $(,)? }) => {
        $(#[$doc])*
        pub struct $name<T> {
            client: Client<T>,
        }

        impl<T: Transport> $name<T> {
            pub(crate) fn new(client: Client<T>) -> Self {
                Self { client }
            }

            $(
                #[doc = concat!("`", $method, "`")]
                pub async fn $func(&self, params: Params) -> Result<Value> {
                    self.client.invoke($method, params).await
                }
            )+
        }
    };
}

namespace!(
    /// `account.*`
    Account {
        get => "account.get",
    }
);

namespace!(
    /// `collection.*`
    Collection {
        create => "collection.create",
        get => "collection.get",
        update => "collection.update",
        delete => "collection.delete",
        list => "collection.list",
        reset => "collection.reset",
    }
);

namespace!(
    /// `text.*`
    Text {
        create => "text.create",
        update => "text.update",
        get => "text.get",
        delete => "text.delete",
        tags => "text.tags",
        related_texts => "text.relatedTexts",
        related_groups => "text.relatedGroups",
    }
);

namespace!(
    /// `group.*`
    Group {
        create => "group.create",
        get => "group.get",
        update => "group.update",
        reset => "group.reset",
        delete => "group.delete",
        list => "group.list",
        add_text => "group.addText",
        delete_text => "group.deleteText",
        list_texts => "group.listTexts",
        related_texts => "group.relatedTexts",
        related_groups => "group.relatedGroups",
    }
);

impl<T: Transport> Collection<T> {
    /// Alias of [`list`](Self::list).
    pub async fn lst(&self, params: Params) -> Result<Value> {
        self.list(params).await
    }
}

impl<T: Transport> Group<T> {
    /// Alias of [`list`](Self::list).
    pub async fn lst(&self, params: Params) -> Result<Value> {
        self.list(params).await
    }
}
