//! Resource descriptors.
//!
//! Each Freshservice collection is described once here: where it lives,
//! which envelope keys wrap it, and whether listing it follows pages.

/// Describes one REST collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resource {
    /// Path segment under `/api/v2`.
    pub segment: &'static str,

    /// Envelope key of a single item.
    pub item_key: &'static str,

    /// Envelope key of a collection.
    pub collection_key: &'static str,

    /// Human-readable noun for confirmations and errors.
    pub noun: &'static str,

    /// Whether listings follow `link` headers.
    pub paginated: bool,
}

impl Resource {
    /// Path of the collection, e.g. `/tickets`.
    pub fn collection_path(&self) -> String {
        format!("/{}", self.segment)
    }

    /// Path of one item, e.g. `/tickets/7`.
    pub fn item_path(&self, id: u64) -> String {
        format!("/{}/{}", self.segment, id)
    }

    /// Path of an action on one item, e.g. `/agents/3/reactivate`.
    pub fn action_path(&self, id: u64, action: &str) -> String {
        format!("/{}/{}/{}", self.segment, id, action)
    }
}

/// Tickets (`/tickets`).
pub const TICKETS: Resource = Resource {
    segment: "tickets",
    item_key: "ticket",
    collection_key: "tickets",
    noun: "ticket",
    paginated: true,
};

/// Requesters (`/requesters`).
pub const REQUESTERS: Resource = Resource {
    segment: "requesters",
    item_key: "requester",
    collection_key: "requesters",
    noun: "requester",
    paginated: true,
};

/// Agents (`/agents`).
pub const AGENTS: Resource = Resource {
    segment: "agents",
    item_key: "agent",
    collection_key: "agents",
    noun: "agent",
    paginated: true,
};

/// Agent roles (`/roles`).
pub const ROLES: Resource = Resource {
    segment: "roles",
    item_key: "role",
    collection_key: "roles",
    noun: "role",
    paginated: false,
};

/// Agent groups (`/groups`).
pub const AGENT_GROUPS: Resource = Resource {
    segment: "groups",
    item_key: "group",
    collection_key: "groups",
    noun: "agent group",
    paginated: false,
};

/// Requester groups (`/requester_groups`).
pub const REQUESTER_GROUPS: Resource = Resource {
    segment: "requester_groups",
    item_key: "requester_group",
    collection_key: "requester_groups",
    noun: "requester group",
    paginated: false,
};

/// Products (`/products`).
pub const PRODUCTS: Resource = Resource {
    segment: "products",
    item_key: "product",
    collection_key: "products",
    noun: "product",
    paginated: false,
};

/// Vendors (`/vendors`).
pub const VENDORS: Resource = Resource {
    segment: "vendors",
    item_key: "vendor",
    collection_key: "vendors",
    noun: "vendor",
    paginated: false,
};

/// Assets (`/assets`), addressed by display ID.
pub const ASSETS: Resource = Resource {
    segment: "assets",
    item_key: "asset",
    collection_key: "assets",
    noun: "asset",
    paginated: true,
};

/// Asset types (`/asset_types`).
pub const ASSET_TYPES: Resource = Resource {
    segment: "asset_types",
    item_key: "asset_type",
    collection_key: "asset_types",
    noun: "asset type",
    paginated: true,
};
