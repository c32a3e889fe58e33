use alloc::sync::Arc;
use core::any::TypeId;

use nodal_model::Reflect;
use nodal_model::cache::{CachedMember, CachedType};
use nodal_model::info::{ParseError, Typed};

use super::{DeserializeVisit, Options, SerializeVisit, VisitContext, Visitor};
use crate::convert::{Reader, ValueContext, Writer};
use crate::naming::{
    ArrayItemNameContext, Case, EnumValueNameContext, MemberNameContext, TypeNameContext,
};
use crate::node::{Format, Node};

// -----------------------------------------------------------------------------
// Erasure helpers

fn erase_reader<T, E, F>(reader: F) -> Reader
where
    T: Reflect,
    E: Into<ParseError>,
    F: Fn(&str, &ValueContext<'_>) -> Result<T, E> + Send + Sync + 'static,
{
    Arc::new(
        move |text: &str, cx: &ValueContext<'_>| -> Result<Box<dyn Reflect>, ParseError> {
            match reader(text, cx) {
                Ok(value) => Ok(Box::new(value)),
                Err(err) => Err(err.into()),
            }
        },
    )
}

fn erase_nullable_reader<T, E, F>(reader: Arc<F>) -> Reader
where
    T: Reflect + Typed,
    E: Into<ParseError>,
    F: Fn(&str, &ValueContext<'_>) -> Result<T, E> + Send + Sync + 'static,
{
    Arc::new(
        move |text: &str, cx: &ValueContext<'_>| -> Result<Box<dyn Reflect>, ParseError> {
            if text.is_empty() {
                return Ok(Box::new(None::<T>));
            }
            match reader(text, cx) {
                Ok(value) => Ok(Box::new(Some(value))),
                Err(err) => Err(err.into()),
            }
        },
    )
}

fn erase_writer<T, F>(writer: F) -> Writer
where
    T: Reflect,
    F: Fn(&T, &ValueContext<'_>) -> String + Send + Sync + 'static,
{
    Arc::new(
        move |value: &dyn Reflect, cx: &ValueContext<'_>| -> Option<String> {
            value.downcast_ref::<T>().map(|value| writer(value, cx))
        },
    )
}

fn erase_nullable_writer<T, F>(writer: Arc<F>) -> Writer
where
    T: Reflect + Typed,
    F: Fn(&T, &ValueContext<'_>) -> String + Send + Sync + 'static,
{
    Arc::new(
        move |value: &dyn Reflect, cx: &ValueContext<'_>| -> Option<String> {
            value
                .downcast_ref::<Option<T>>()?
                .as_ref()
                .map(|value| writer(value, cx))
        },
    )
}

// -----------------------------------------------------------------------------
// OptionsBuilder

/// Builder of [`Options`].
///
/// Every method consumes and returns the builder; [`build`](Self::build)
/// freezes the result.
#[derive(Clone, Debug, Default)]
pub struct OptionsBuilder {
    options: Options,
}

impl From<Options> for OptionsBuilder {
    #[inline]
    fn from(options: Options) -> Self {
        Self { options }
    }
}

impl From<OptionsBuilder> for Options {
    #[inline]
    fn from(builder: OptionsBuilder) -> Self {
        builder.build()
    }
}

impl OptionsBuilder {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn build(self) -> Options {
        self.options
    }

    // -------------------------------------------------------------------------
    // Flags

    pub fn ignore_case(mut self, value: bool) -> Self {
        self.options.ignore_case = value;
        self
    }

    pub fn fail_on_unmatched_elements(mut self, value: bool) -> Self {
        self.options.fail_on_unmatched_elements = value;
        self
    }

    pub fn fail_on_unmatched_members(mut self, value: bool) -> Self {
        self.options.fail_on_unmatched_members = value;
        self
    }

    pub fn default_non_nullable_when_empty(mut self, value: bool) -> Self {
        self.options.default_non_nullable_when_empty = value;
        self
    }

    pub fn exclude_null_values(mut self, value: bool) -> Self {
        self.options.exclude_null_values = value;
        self
    }

    pub fn pretty_print(mut self, value: bool) -> Self {
        self.options.pretty_print = value;
        self
    }

    pub fn root_name(mut self, name: impl Into<String>) -> Self {
        self.options.root_name = Some(name.into());
        self
    }

    // -------------------------------------------------------------------------
    // Filters

    /// Maps only members whose type matches one of the include filters.
    pub fn include_types<P>(mut self, predicate: P) -> Self
    where
        P: Fn(&CachedType) -> bool + Send + Sync + 'static,
    {
        self.options.include_types.push(Arc::new(predicate));
        self
    }

    /// Skips members whose type matches.
    pub fn exclude_types<P>(mut self, predicate: P) -> Self
    where
        P: Fn(&CachedType) -> bool + Send + Sync + 'static,
    {
        self.options.exclude_types.push(Arc::new(predicate));
        self
    }

    /// Maps only members matching one of the include filters.
    pub fn include_members<P>(mut self, predicate: P) -> Self
    where
        P: Fn(&CachedMember, &CachedType) -> bool + Send + Sync + 'static,
    {
        self.options.include_members.push(Arc::new(predicate));
        self
    }

    /// Skips matching members.
    pub fn exclude_members<P>(mut self, predicate: P) -> Self
    where
        P: Fn(&CachedMember, &CachedType) -> bool + Send + Sync + 'static,
    {
        self.options.exclude_members.push(Arc::new(predicate));
        self
    }

    /// Maps matching collections that also have members as objects.
    pub fn treat_as_object<P>(mut self, predicate: P) -> Self
    where
        P: Fn(&CachedType) -> bool + Send + Sync + 'static,
    {
        self.options.treat_as_object.push(Arc::new(predicate));
        self
    }

    // -------------------------------------------------------------------------
    // Naming

    pub fn with_type_naming<F>(mut self, transform: F) -> Self
    where
        F: Fn(&str, &TypeNameContext) -> String + Send + Sync + 'static,
    {
        self.options.type_naming.add(transform);
        self
    }

    pub fn with_type_naming_when<P, F>(mut self, predicate: P, transform: F) -> Self
    where
        P: Fn(&TypeNameContext) -> bool + Send + Sync + 'static,
        F: Fn(&str, &TypeNameContext) -> String + Send + Sync + 'static,
    {
        self.options.type_naming.add_when(predicate, transform);
        self
    }

    pub fn with_member_naming<F>(mut self, transform: F) -> Self
    where
        F: Fn(&str, &MemberNameContext) -> String + Send + Sync + 'static,
    {
        self.options.member_naming.add(transform);
        self
    }

    pub fn with_member_naming_when<P, F>(mut self, predicate: P, transform: F) -> Self
    where
        P: Fn(&MemberNameContext) -> bool + Send + Sync + 'static,
        F: Fn(&str, &MemberNameContext) -> String + Send + Sync + 'static,
    {
        self.options.member_naming.add_when(predicate, transform);
        self
    }

    pub fn with_array_item_naming<F>(mut self, transform: F) -> Self
    where
        F: Fn(&str, &ArrayItemNameContext) -> String + Send + Sync + 'static,
    {
        self.options.array_item_naming.add(transform);
        self
    }

    pub fn with_array_item_naming_when<P, F>(mut self, predicate: P, transform: F) -> Self
    where
        P: Fn(&ArrayItemNameContext) -> bool + Send + Sync + 'static,
        F: Fn(&str, &ArrayItemNameContext) -> String + Send + Sync + 'static,
    {
        self.options.array_item_naming.add_when(predicate, transform);
        self
    }

    pub fn with_enum_naming<F>(mut self, transform: F) -> Self
    where
        F: Fn(&str, &EnumValueNameContext) -> String + Send + Sync + 'static,
    {
        self.options.enum_naming.add(transform);
        self
    }

    pub fn with_enum_naming_when<P, F>(mut self, predicate: P, transform: F) -> Self
    where
        P: Fn(&EnumValueNameContext) -> bool + Send + Sync + 'static,
        F: Fn(&str, &EnumValueNameContext) -> String + Send + Sync + 'static,
    {
        self.options.enum_naming.add_when(predicate, transform);
        self
    }

    /// Adds a member naming rule converting to `case`.
    pub fn member_case(mut self, case: Case) -> Self {
        self.options.member_naming.add(move |name, _| case.apply(name));
        self
    }

    /// Adds a type naming rule converting to `case`.
    pub fn type_case(mut self, case: Case) -> Self {
        self.options.type_naming.add(move |name, _| case.apply(name));
        self
    }

    /// Adds an enum value naming rule converting to `case`.
    pub fn enum_value_case(mut self, case: Case) -> Self {
        self.options.enum_naming.add(move |name, _| case.apply(name));
        self
    }

    // -------------------------------------------------------------------------
    // Conversion

    /// Reads `T` with `reader` in every format.
    ///
    /// A registered reader makes `T` a simple value, whatever its shape.
    pub fn with_reader<T, E, F>(mut self, reader: F) -> Self
    where
        T: Reflect,
        E: Into<ParseError>,
        F: Fn(&str, &ValueContext<'_>) -> Result<T, E> + Send + Sync + 'static,
    {
        self.options
            .converters
            .insert_reader(TypeId::of::<T>(), None, erase_reader(reader));
        self
    }

    /// Reads `T` with `reader` in `format` only.
    pub fn with_reader_in<T, E, F>(mut self, format: Format, reader: F) -> Self
    where
        T: Reflect,
        E: Into<ParseError>,
        F: Fn(&str, &ValueContext<'_>) -> Result<T, E> + Send + Sync + 'static,
    {
        self.options
            .converters
            .insert_reader(TypeId::of::<T>(), Some(format), erase_reader(reader));
        self
    }

    /// Reads `T` and `Option<T>` with `reader`.
    ///
    /// Empty text reads as `None` without calling `reader`.
    pub fn with_nullable_reader<T, E, F>(mut self, reader: F) -> Self
    where
        T: Reflect + Typed,
        E: Into<ParseError>,
        F: Fn(&str, &ValueContext<'_>) -> Result<T, E> + Send + Sync + 'static,
    {
        let reader = Arc::new(reader);
        let base = reader.clone();
        let converters = &mut self.options.converters;
        converters.insert_reader(
            TypeId::of::<T>(),
            None,
            erase_reader(move |text: &str, cx: &ValueContext<'_>| base(text, cx)),
        );
        converters.insert_reader(
            TypeId::of::<Option<T>>(),
            None,
            erase_nullable_reader(reader),
        );
        self
    }

    /// Writes `T` with `writer` in every format.
    pub fn with_writer<T, F>(mut self, writer: F) -> Self
    where
        T: Reflect,
        F: Fn(&T, &ValueContext<'_>) -> String + Send + Sync + 'static,
    {
        self.options
            .converters
            .insert_writer(TypeId::of::<T>(), None, erase_writer(writer));
        self
    }

    /// Writes `T` with `writer` in `format` only.
    pub fn with_writer_in<T, F>(mut self, format: Format, writer: F) -> Self
    where
        T: Reflect,
        F: Fn(&T, &ValueContext<'_>) -> String + Send + Sync + 'static,
    {
        self.options
            .converters
            .insert_writer(TypeId::of::<T>(), Some(format), erase_writer(writer));
        self
    }

    /// Writes `T` and `Option<T>` with `writer`, `None` is written as null.
    pub fn with_nullable_writer<T, F>(mut self, writer: F) -> Self
    where
        T: Reflect + Typed,
        F: Fn(&T, &ValueContext<'_>) -> String + Send + Sync + 'static,
    {
        let writer = Arc::new(writer);
        let base = writer.clone();
        let converters = &mut self.options.converters;
        converters.insert_writer(
            TypeId::of::<T>(),
            None,
            erase_writer(move |value: &T, cx: &ValueContext<'_>| base(value, cx)),
        );
        converters.insert_writer(
            TypeId::of::<Option<T>>(),
            None,
            erase_nullable_writer(writer),
        );
        self
    }

    /// Sets the end-user message of parse failures of `T`.
    ///
    /// `{value}` is replaced with the offending raw value.
    pub fn friendly_parse_message<T: Reflect>(mut self, message: impl Into<String>) -> Self {
        self.options
            .friendly_parse_messages
            .insert(TypeId::of::<T>(), message.into());
        self
    }

    /// Creates `T` with `factory` instead of its constructors.
    ///
    /// The factory receives the enclosing instance, if any.
    pub fn with_factory<T, F>(mut self, factory: F) -> Self
    where
        T: Reflect,
        F: Fn(Option<&dyn Reflect>) -> Option<T> + Send + Sync + 'static,
    {
        self.options.factories.insert(
            TypeId::of::<T>(),
            Arc::new(
                move |parent: Option<&dyn Reflect>| -> Option<Box<dyn Reflect>> {
                    match factory(parent) {
                        Some(value) => Some(Box::new(value)),
                        None => None,
                    }
                },
            ),
        );
        self
    }

    // -------------------------------------------------------------------------
    // Visitors

    fn push_deserialize(mut self, visitor: Visitor<DeserializeVisit>) -> Self {
        self.options.visitors.deserialize.push(visitor);
        self
    }

    fn push_serialize(mut self, visitor: Visitor<SerializeVisit>) -> Self {
        self.options.visitors.serialize.push(visitor);
        self
    }

    /// Runs `visit` on every value read, in every format.
    pub fn on_deserialized<F>(self, visit: F) -> Self
    where
        F: Fn(&dyn Node, &mut dyn Reflect, &VisitContext<'_>) + Send + Sync + 'static,
    {
        self.push_deserialize(Visitor::new(Arc::new(visit)))
    }

    /// Runs `visit` on every `T` read.
    pub fn on_deserialized_for<T, F>(self, visit: F) -> Self
    where
        T: Reflect,
        F: Fn(&dyn Node, &mut T, &VisitContext<'_>) + Send + Sync + 'static,
    {
        self.push_deserialize(typed_deserialize_visitor(visit))
    }

    /// Runs `visit` on every `T` read in `format`.
    pub fn on_deserialized_for_in<T, F>(self, format: Format, visit: F) -> Self
    where
        T: Reflect,
        F: Fn(&dyn Node, &mut T, &VisitContext<'_>) + Send + Sync + 'static,
    {
        let mut visitor = typed_deserialize_visitor(visit);
        visitor.format = Some(format);
        self.push_deserialize(visitor)
    }

    /// Runs `visit` on every value read in `format`.
    pub fn on_deserialized_in<F>(self, format: Format, visit: F) -> Self
    where
        F: Fn(&dyn Node, &mut dyn Reflect, &VisitContext<'_>) + Send + Sync + 'static,
    {
        let mut visitor = Visitor::new(Arc::new(visit) as DeserializeVisit);
        visitor.format = Some(format);
        self.push_deserialize(visitor)
    }

    /// Runs `visit` on every value read that `predicate` accepts.
    pub fn on_deserialized_when<P, F>(self, predicate: P, visit: F) -> Self
    where
        P: Fn(&dyn Node, &dyn Reflect, &VisitContext<'_>) -> bool + Send + Sync + 'static,
        F: Fn(&dyn Node, &mut dyn Reflect, &VisitContext<'_>) + Send + Sync + 'static,
    {
        let mut visitor = Visitor::new(Arc::new(visit) as DeserializeVisit);
        visitor.predicate = Some(Arc::new(predicate));
        self.push_deserialize(visitor)
    }

    /// Runs `visit` on every node written, in every format.
    pub fn on_serialized<F>(self, visit: F) -> Self
    where
        F: Fn(&dyn Reflect, &mut dyn Node, &VisitContext<'_>) + Send + Sync + 'static,
    {
        self.push_serialize(Visitor::new(Arc::new(visit)))
    }

    /// Runs `visit` on every node written from a `T`.
    pub fn on_serialized_for<T, F>(self, visit: F) -> Self
    where
        T: Reflect,
        F: Fn(&T, &mut dyn Node, &VisitContext<'_>) + Send + Sync + 'static,
    {
        self.push_serialize(typed_serialize_visitor(visit))
    }

    /// Runs `visit` on every node written from a `T` in `format`.
    pub fn on_serialized_for_in<T, F>(self, format: Format, visit: F) -> Self
    where
        T: Reflect,
        F: Fn(&T, &mut dyn Node, &VisitContext<'_>) + Send + Sync + 'static,
    {
        let mut visitor = typed_serialize_visitor(visit);
        visitor.format = Some(format);
        self.push_serialize(visitor)
    }

    /// Runs `visit` on every node written in `format`.
    pub fn on_serialized_in<F>(self, format: Format, visit: F) -> Self
    where
        F: Fn(&dyn Reflect, &mut dyn Node, &VisitContext<'_>) + Send + Sync + 'static,
    {
        let mut visitor = Visitor::new(Arc::new(visit) as SerializeVisit);
        visitor.format = Some(format);
        self.push_serialize(visitor)
    }

    /// Runs `visit` on every node written that `predicate` accepts.
    pub fn on_serialized_when<P, F>(self, predicate: P, visit: F) -> Self
    where
        P: Fn(&dyn Node, &dyn Reflect, &VisitContext<'_>) -> bool + Send + Sync + 'static,
        F: Fn(&dyn Reflect, &mut dyn Node, &VisitContext<'_>) + Send + Sync + 'static,
    {
        let mut visitor = Visitor::new(Arc::new(visit) as SerializeVisit);
        visitor.predicate = Some(Arc::new(predicate));
        self.push_serialize(visitor)
    }
}

fn typed_deserialize_visitor<T, F>(visit: F) -> Visitor<DeserializeVisit>
where
    T: Reflect,
    F: Fn(&dyn Node, &mut T, &VisitContext<'_>) + Send + Sync + 'static,
{
    let erased: DeserializeVisit = Arc::new(
        move |node: &dyn Node, value: &mut dyn Reflect, cx: &VisitContext<'_>| {
            if let Some(value) = value.downcast_mut::<T>() {
                visit(node, value, cx);
            }
        },
    );
    let mut visitor = Visitor::new(erased);
    visitor.ty = Some(TypeId::of::<T>());
    visitor
}

fn typed_serialize_visitor<T, F>(visit: F) -> Visitor<SerializeVisit>
where
    T: Reflect,
    F: Fn(&T, &mut dyn Node, &VisitContext<'_>) + Send + Sync + 'static,
{
    let erased: SerializeVisit = Arc::new(
        move |value: &dyn Reflect, node: &mut dyn Node, cx: &VisitContext<'_>| {
            if let Some(value) = value.downcast_ref::<T>() {
                visit(value, node, cx);
            }
        },
    );
    let mut visitor = Visitor::new(erased);
    visitor.ty = Some(TypeId::of::<T>());
    visitor
}
