use alloc::sync::Arc;

use nodal_model::Reflect;
use nodal_model::cache::{CachedMember, CachedType};
use nodal_model::info::ValueKind;
use nodal_model::ops::ReflectRef;

use super::context::{Context, Frame, is_null, present};
use crate::convert::write_value;
use crate::error::{MappingError, Result};
use crate::naming::{ArrayItemNameContext, MemberNameContext};
use crate::node::{Node, NodeKind};

impl Context<'_> {
    /// The node kind `value` of type `ty` is written as.
    pub(super) fn node_kind(&self, value: &dyn Reflect, ty: &CachedType, frame: Frame) -> Result<NodeKind> {
        Ok(match frame {
            Frame::Simple => NodeKind::Value,
            Frame::Object | Frame::Dictionary => NodeKind::Object,
            Frame::Array => NodeKind::Array,
            Frame::Optional => match present(value) {
                None => NodeKind::Value,
                Some(inner) => {
                    let inner_ty = self.cached(inner.reflect_type_info());
                    let inner_frame = self.classify(&inner_ty)?;
                    if inner_frame == Frame::Optional {
                        return Err(MappingError::type_not_supported(ty.type_path(), "nested options"));
                    }
                    self.node_kind(inner, &inner_ty, inner_frame)?
                }
            },
        })
    }

    /// Writes `value` into `node`, whose kind was chosen by [`node_kind`](Self::node_kind).
    pub(super) fn write(
        &mut self,
        value: &dyn Reflect,
        ty: &Arc<CachedType>,
        frame: Frame,
        node: &mut dyn Node,
        member: Option<&CachedMember>,
    ) -> Result<()> {
        match frame {
            Frame::Simple => {
                let (text, kind) = write_value(self.options, value, &self.value_context(ty, member))?;
                node.set_value(text, kind);
            }
            Frame::Optional => {
                let Some(inner) = present(value) else {
                    node.set_value(None, ValueKind::default());
                    let cx = self.visit_context(ty, member);
                    self.options.visitors().run_serialize(value, node, &cx);
                    return Ok(());
                };
                // The present value runs its own visitors.
                let inner_ty = self.cached(inner.reflect_type_info());
                let inner_frame = self.classify(&inner_ty)?;
                return self.write(inner, &inner_ty, inner_frame, node, member);
            }
            Frame::Object => self.write_object(value, ty, node)?,
            Frame::Array => self.write_array(value, ty, node, member)?,
            Frame::Dictionary => self.write_dictionary(value, ty, node, member)?,
        }

        let cx = self.visit_context(ty, member);
        self.options.visitors().run_serialize(value, node, &cx);
        Ok(())
    }

    fn write_object(&mut self, value: &dyn Reflect, ty: &Arc<CachedType>, node: &mut dyn Node) -> Result<()> {
        log::trace!("serialize object `{}` at {}", ty.type_path(), self.render_path());

        let Some(object) = value.as_object() else {
            return Err(MappingError::type_not_supported(ty.type_path(), "value exposes no members"));
        };

        for member in ty.members() {
            if !member.is_readable() || !self.maps_member(member, ty) {
                continue;
            }
            let Some(member_value) = object.member(member.name()) else {
                continue;
            };
            if self.options.exclude_null_values()
                && is_null(member_value)
                && !node.requires_null_marker()
            {
                continue;
            }

            let context = MemberNameContext {
                member: *member,
                declaring: ty.clone(),
                format: self.format,
            };
            let name = self.options.member_naming().resolve(member.default_name(), &context);

            self.path.push_name(&name);
            let result = self.write_child(member_value, node, &name, Some(member));
            let result = result.map_err(|err| err.within_member(member).at(|| self.render_path()));
            self.path.pop();
            result?;
        }
        Ok(())
    }

    fn write_array(
        &mut self,
        value: &dyn Reflect,
        ty: &Arc<CachedType>,
        node: &mut dyn Node,
        member: Option<&CachedMember>,
    ) -> Result<()> {
        log::trace!("serialize array `{}` at {}", ty.type_path(), self.render_path());

        let ReflectRef::List(list) = value.reflect_ref() else {
            return Err(MappingError::type_not_supported(ty.type_path(), "value is not a list"));
        };
        let item_name = match ty.item() {
            Some(item) => self.item_name(&self.cached(item), ty, member),
            None => String::new(),
        };

        for (index, item) in list.iter().enumerate() {
            self.path.push_index(index);
            let result = self.write_child(item, node, &item_name, member);
            let result = result.map_err(|err| err.at(|| self.render_path()));
            self.path.pop();
            result?;
        }
        Ok(())
    }

    fn write_dictionary(
        &mut self,
        value: &dyn Reflect,
        ty: &Arc<CachedType>,
        node: &mut dyn Node,
        member: Option<&CachedMember>,
    ) -> Result<()> {
        log::trace!("serialize dictionary `{}` at {}", ty.type_path(), self.render_path());

        let ReflectRef::Dictionary(dict) = value.reflect_ref() else {
            return Err(MappingError::type_not_supported(ty.type_path(), "value is not a dictionary"));
        };

        for (key, entry) in dict.iter() {
            let name = self.key_name(key, member)?;
            self.path.push_name(&name);
            let result = self.write_child(entry, node, &name, member);
            let result = result.map_err(|err| err.at(|| self.render_path()));
            self.path.pop();
            result?;
        }
        Ok(())
    }

    /// Adds a child named `name` to `node` and writes `value` into it.
    fn write_child(
        &mut self,
        value: &dyn Reflect,
        node: &mut dyn Node,
        name: &str,
        member: Option<&CachedMember>,
    ) -> Result<()> {
        let ty = self.cached(value.reflect_type_info());
        let frame = self.classify(&ty)?;
        let kind = self.node_kind(value, &ty, frame)?;
        let child = node.add_child(name, kind)?;
        self.write(value, &ty, frame, child, member)
    }

    fn key_name(&self, key: &dyn Reflect, member: Option<&CachedMember>) -> Result<String> {
        let key_ty = self.cached(key.reflect_type_info());
        if self.classify(&key_ty)? != Frame::Simple {
            return Err(MappingError::type_not_supported(
                key_ty.type_path(),
                "dictionary keys must be simple values",
            ));
        }
        match write_value(self.options, key, &self.value_context(&key_ty, member))? {
            (Some(name), _) => Ok(name),
            (None, _) => Err(MappingError::value_cannot_be_null(key_ty.type_path())),
        }
    }

    /// Resolves the name of the items of `list`: the item's type name,
    /// then the array item naming chain.
    pub(super) fn item_name(
        &self,
        item: &Arc<CachedType>,
        list: &Arc<CachedType>,
        member: Option<&CachedMember>,
    ) -> String {
        let default = self.type_name(item, false);
        let context = ArrayItemNameContext {
            item: item.clone(),
            list: list.clone(),
            member: member.copied(),
            format: self.format,
        };
        self.options.array_item_naming().resolve(&default, &context)
    }
}
