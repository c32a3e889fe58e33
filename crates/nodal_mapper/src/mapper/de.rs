use alloc::sync::Arc;

use nodal_model::Reflect;
use nodal_model::cache::{CachedMember, CachedType};
use nodal_model::info::TypeInfo;

use super::context::{Context, Frame};
use crate::convert::read_value;
use crate::error::{MappingError, Result};
use crate::naming::MemberNameContext;
use crate::node::{Node, NodeKind};

impl Context<'_> {
    /// Reads `node` as a value of `ty`.
    ///
    /// `parent` is the enclosing object under construction, handed to
    /// factories and parent constructors.
    pub(super) fn read(
        &mut self,
        node: &dyn Node,
        ty: &Arc<CachedType>,
        frame: Frame,
        member: Option<&CachedMember>,
        parent: Option<&dyn Reflect>,
    ) -> Result<Box<dyn Reflect>> {
        if node.is_null() {
            return self.null_value(ty);
        }

        let mut value = match frame {
            Frame::Simple => self.read_simple(node, ty, member)?,
            // The present value runs its own visitors.
            Frame::Optional => return self.read_optional(node, ty, member, parent),
            Frame::Object => self.read_object(node, ty, parent)?,
            Frame::Array => self.read_array(node, ty, member, parent)?,
            Frame::Dictionary => self.read_dictionary(node, ty, member, parent)?,
        };

        let cx = self.visit_context(ty, member);
        self.options.visitors().run_deserialize(node, &mut *value, &cx);
        Ok(value)
    }

    /// The value of `ty` read from a null node.
    fn null_value(&self, ty: &CachedType) -> Result<Box<dyn Reflect>> {
        if let TypeInfo::Optional(optional) = ty.info() {
            return Ok(optional.none());
        }
        if self.options.default_non_nullable_when_empty()
            && let Some(zero) = ty.simple().and_then(|simple| simple.zero_value())
        {
            return Ok(zero);
        }
        Err(MappingError::value_cannot_be_null(ty.type_path()))
    }

    /// Whether empty text reads as null for `ty`.
    ///
    /// Strings keep empty text, as do types with a user reader.
    fn empty_is_null(&self, ty: &CachedType) -> bool {
        !ty.ty().is::<String>() && self.options.converters().reader(ty.type_id(), self.format).is_none()
    }

    fn read_simple(
        &mut self,
        node: &dyn Node,
        ty: &Arc<CachedType>,
        member: Option<&CachedMember>,
    ) -> Result<Box<dyn Reflect>> {
        if !node.can_be(NodeKind::Value) {
            return Err(MappingError::node_type_mismatch(ty.type_path(), "a value node"));
        }
        let text = node.value().unwrap_or_default();
        if text.is_empty() && self.empty_is_null(ty) {
            return self.null_value(ty);
        }
        read_value(self.options, text, &self.value_context(ty, member))
    }

    fn read_optional(
        &mut self,
        node: &dyn Node,
        ty: &Arc<CachedType>,
        member: Option<&CachedMember>,
        parent: Option<&dyn Reflect>,
    ) -> Result<Box<dyn Reflect>> {
        let TypeInfo::Optional(optional) = ty.info() else {
            return Err(MappingError::type_not_supported(ty.type_path(), "not an option"));
        };
        let inner = self.cached(optional.inner());
        let frame = self.classify(&inner)?;
        if frame == Frame::Optional {
            return Err(MappingError::type_not_supported(ty.type_path(), "nested options"));
        }

        if frame == Frame::Simple
            && node.can_be(NodeKind::Value)
            && node.value().is_some_and(str::is_empty)
            && self.empty_is_null(&inner)
        {
            return Ok(optional.none());
        }

        let value = self.read(node, &inner, frame, member, parent)?;
        optional.some(value).map_err(|_| {
            MappingError::type_not_supported(ty.type_path(), "inner value has another type")
        })
    }

    fn read_object(
        &mut self,
        node: &dyn Node,
        ty: &Arc<CachedType>,
        parent: Option<&dyn Reflect>,
    ) -> Result<Box<dyn Reflect>> {
        log::trace!("deserialize object `{}` at {}", ty.type_path(), self.render_path());

        if !node.can_be(NodeKind::Object) {
            return Err(MappingError::node_type_mismatch(ty.type_path(), "an object node"));
        }
        let mut value = self.construct(ty, parent)?;

        let members: Vec<(&CachedMember, String)> = ty
            .members()
            .iter()
            .filter(|member| self.maps_member(member, ty))
            .map(|member| {
                let context = MemberNameContext {
                    member: *member,
                    declaring: ty.clone(),
                    format: self.format,
                };
                (member, self.options.member_naming().resolve(member.default_name(), &context))
            })
            .collect();
        let mut matched = vec![false; members.len()];

        for child in node.children() {
            let found = members
                .iter()
                .position(|(_, name)| self.options.names_match(name, child.name()));
            let Some(position) = found else {
                if self.options.fail_on_unmatched_elements() {
                    self.path.push_name(child.name());
                    let err = MappingError::unmatched_node(child.name(), ty.type_path())
                        .at(|| self.render_path());
                    self.path.pop();
                    return Err(err);
                }
                continue;
            };
            matched[position] = true;

            let member = members[position].0;
            if !member.is_writable() {
                continue;
            }

            self.path.push_name(child.name());
            let result = self.read_member(child, member, &*value);
            let result = result.map_err(|err| err.within_member(member).at(|| self.render_path()));
            self.path.pop();
            let member_value = result?;

            let Some(slot) = value
                .as_object_mut()
                .and_then(|object| object.member_mut(member.name()))
            else {
                return Err(MappingError::type_not_supported(
                    ty.type_path(),
                    format!("member `{}` is not accessible", member.name()),
                ));
            };
            if slot.set(member_value).is_err() {
                return Err(MappingError::type_not_supported(
                    ty.type_path(),
                    format!("member `{}` rejected a value of its declared type", member.name()),
                ));
            }
        }

        if self.options.fail_on_unmatched_members()
            && let Some((member, _)) = members
                .iter()
                .zip(&matched)
                .find_map(|(entry, hit)| (!*hit && entry.0.is_writable()).then_some(entry))
        {
            return Err(MappingError::unmatched_member(member)
                .within_member(member)
                .at(|| self.render_path()));
        }

        Ok(value)
    }

    fn read_member(
        &mut self,
        node: &dyn Node,
        member: &CachedMember,
        parent: &dyn Reflect,
    ) -> Result<Box<dyn Reflect>> {
        let ty = self.cached(member.type_info());
        let frame = self.classify(&ty)?;
        self.read(node, &ty, frame, Some(member), Some(parent))
    }

    fn read_array(
        &mut self,
        node: &dyn Node,
        ty: &Arc<CachedType>,
        member: Option<&CachedMember>,
        parent: Option<&dyn Reflect>,
    ) -> Result<Box<dyn Reflect>> {
        log::trace!("deserialize array `{}` at {}", ty.type_path(), self.render_path());

        if !node.can_be(NodeKind::Array) {
            return Err(MappingError::node_type_mismatch(ty.type_path(), "an array node"));
        }
        let Some(item) = ty.item() else {
            return Err(MappingError::type_not_supported(ty.type_path(), "no declared item type"));
        };
        let item = self.cached(item);
        let frame = self.classify(&item)?;
        let mut value = self.construct(ty, parent)?;

        for (index, child) in node.children().enumerate() {
            self.path.push_index(index);
            let result = self.read(child, &item, frame, member, parent);
            let result = result.map_err(|err| err.at(|| self.render_path()));
            self.path.pop();
            let item_value = result?;

            let Some(list) = value.reflect_mut().into_list() else {
                return Err(MappingError::type_not_supported(ty.type_path(), "value is not a list"));
            };
            if list.push(item_value).is_err() {
                return Err(MappingError::type_not_supported(
                    ty.type_path(),
                    "list rejected a value of its item type",
                ));
            }
        }
        Ok(value)
    }

    fn read_dictionary(
        &mut self,
        node: &dyn Node,
        ty: &Arc<CachedType>,
        member: Option<&CachedMember>,
        parent: Option<&dyn Reflect>,
    ) -> Result<Box<dyn Reflect>> {
        log::trace!("deserialize dictionary `{}` at {}", ty.type_path(), self.render_path());

        if !node.can_be(NodeKind::Object) {
            return Err(MappingError::node_type_mismatch(ty.type_path(), "an object node"));
        }
        let (Some(key), Some(entry)) = (ty.key(), ty.value()) else {
            return Err(MappingError::type_not_supported(ty.type_path(), "no declared key and value types"));
        };
        let key = self.cached(key);
        if self.classify(&key)? != Frame::Simple {
            return Err(MappingError::type_not_supported(
                key.type_path(),
                "dictionary keys must be simple values",
            ));
        }
        let entry = self.cached(entry);
        let frame = self.classify(&entry)?;
        let mut value = self.construct(ty, parent)?;

        for child in node.children() {
            self.path.push_name(child.name());
            let result = self.read_entry(child, (&key, &entry), frame, member, parent);
            let result = result.map_err(|err| err.at(|| self.render_path()));
            self.path.pop();
            let (key_value, entry_value) = result?;

            let Some(dict) = value.reflect_mut().into_dictionary() else {
                return Err(MappingError::type_not_supported(ty.type_path(), "value is not a dictionary"));
            };
            if dict.insert(key_value, entry_value).is_err() {
                return Err(MappingError::type_not_supported(
                    ty.type_path(),
                    "dictionary rejected an entry of its declared types",
                ));
            }
        }
        Ok(value)
    }

    /// Reads the key from the name of `node` and the value from its content.
    fn read_entry(
        &mut self,
        node: &dyn Node,
        (key, entry): (&Arc<CachedType>, &Arc<CachedType>),
        frame: Frame,
        member: Option<&CachedMember>,
        parent: Option<&dyn Reflect>,
    ) -> Result<(Box<dyn Reflect>, Box<dyn Reflect>)> {
        let key_value = read_value(self.options, node.name(), &self.value_context(key, member))?;
        let entry_value = self.read(node, entry, frame, member, parent)?;
        Ok((key_value, entry_value))
    }

    // -------------------------------------------------------------------------
    // Construction

    /// Creates an empty instance of `ty`.
    ///
    /// A registered factory wins, then a parent constructor accepting
    /// `parent`, then the default constructor. Collections without
    /// constructors fall back to their empty value.
    fn construct(&self, ty: &CachedType, parent: Option<&dyn Reflect>) -> Result<Box<dyn Reflect>> {
        if let Some(factory) = self.options.factory(ty.type_id()) {
            return factory(parent)
                .ok_or_else(|| MappingError::object_creation(ty.type_path(), "the factory returned no value"));
        }

        let constructors = ty.constructors();
        if let Some(ctor) = constructors.parent_fn()
            && let Some(parent) = parent
            && ctor.accepts(parent)
            && let Some(value) = ctor.construct(parent)
        {
            return Ok(value);
        }
        if let Some(default) = constructors.default_fn() {
            return Ok(default());
        }
        ty.construct_collection().ok_or_else(|| {
            MappingError::object_creation(ty.type_path(), "no factory, default or parent constructor applies")
        })
    }
}
