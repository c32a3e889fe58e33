use alloc::sync::Arc;

use nodal_model::cache::{CachedMember, CachedType};
use nodal_model::info::VariantInfo;

use crate::node::Format;

/// Context of the type naming chain.
#[derive(Debug, Clone)]
pub struct TypeNameContext {
    pub ty: Arc<CachedType>,
    /// The name is the one of a root node.
    pub is_root: bool,
    pub format: Format,
}

/// Context of the member naming chain.
#[derive(Debug, Clone)]
pub struct MemberNameContext {
    pub member: CachedMember,
    pub declaring: Arc<CachedType>,
    pub format: Format,
}

/// Context of the array item naming chain.
#[derive(Debug, Clone)]
pub struct ArrayItemNameContext {
    pub item: Arc<CachedType>,
    pub list: Arc<CachedType>,
    /// The member holding the list, `None` for a root list.
    pub member: Option<CachedMember>,
    pub format: Format,
}

/// Context of the enum value naming chain.
#[derive(Debug, Clone)]
pub struct EnumValueNameContext {
    pub ty: Arc<CachedType>,
    pub variant: &'static VariantInfo,
    pub format: Format,
}
