use alloc::boxed::Box;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::any::{Any, TypeId, type_name};
use core::fmt;

use super::{ArgSlot, DefaultFn};
use crate::codec::DecodeError;
use crate::registry::{AnyRecord, Record};

pub(crate) type InvokeFn =
    Arc<dyn Fn(&mut ConstructorArgs<'_>) -> Result<Box<dyn AnyRecord>, DecodeError> + Send + Sync>;

// -----------------------------------------------------------------------------
// ParameterInfo

/// One constructor parameter, bound to a member of the same name.
#[derive(Clone)]
pub struct ParameterInfo {
    pub(crate) name: &'static str,
    pub(crate) member: usize,
    pub(crate) type_name: &'static str,
    pub(crate) default: Option<DefaultFn>,
}

impl ParameterInfo {
    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Index of the bound member in [`TypeModel::members`](crate::TypeModel::members).
    #[inline]
    pub fn member(&self) -> usize {
        self.member
    }

    #[inline]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Whether an absent key is filled with a default.
    #[inline]
    pub fn has_default(&self) -> bool {
        self.default.is_some()
    }

    #[inline]
    pub(crate) fn default_value(&self) -> Option<Box<dyn Any>> {
        self.default.as_ref().map(|f| f())
    }
}

impl fmt::Debug for ParameterInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParameterInfo")
            .field("name", &self.name)
            .field("member", &self.member)
            .field("type_name", &self.type_name)
            .field("has_default", &self.has_default())
            .finish()
    }
}

// -----------------------------------------------------------------------------
// ConstructorInfo

/// The selected constructor of a type model.
#[derive(Clone)]
pub struct ConstructorInfo {
    pub(crate) params: Box<[ParameterInfo]>,
    pub(crate) preferred: bool,
    pub(crate) invoke: InvokeFn,
}

impl ConstructorInfo {
    #[inline]
    pub fn params(&self) -> &[ParameterInfo] {
        &self.params
    }

    #[inline]
    pub fn is_parameterless(&self) -> bool {
        self.params.is_empty()
    }

    #[inline]
    pub fn is_preferred(&self) -> bool {
        self.preferred
    }

    /// Builds an instance from staged arguments.
    #[inline]
    pub fn invoke(&self, args: &mut ConstructorArgs<'_>) -> Result<Box<dyn AnyRecord>, DecodeError> {
        (self.invoke)(args)
    }
}

impl fmt::Debug for ConstructorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConstructorInfo")
            .field("params", &self.params)
            .field("preferred", &self.preferred)
            .finish_non_exhaustive()
    }
}

// -----------------------------------------------------------------------------
// ConstructorArgs

/// The staged arguments handed to a constructor.
pub struct ConstructorArgs<'a> {
    type_name: &'static str,
    params: &'a [ParameterInfo],
    slots: &'a mut [ArgSlot],
}

impl<'a> ConstructorArgs<'a> {
    pub(crate) fn new(
        type_name: &'static str,
        params: &'a [ParameterInfo],
        slots: &'a mut [ArgSlot],
    ) -> Self {
        Self {
            type_name,
            params,
            slots,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Moves the argument at `index` out as a `T`.
    ///
    /// `T` is the declared type of the bound member.
    pub fn take<T: 'static>(&mut self, index: usize) -> Result<T, DecodeError> {
        let parameter = self.params.get(index).map_or("?", |p| p.name);
        let value = self
            .slots
            .get_mut(index)
            .and_then(ArgSlot::take)
            .ok_or(DecodeError::MissingParameter {
                type_name: self.type_name,
                parameter,
            })?;
        value
            .downcast::<T>()
            .map(|v| *v)
            .map_err(|_| DecodeError::Mismatch {
                expected: type_name::<T>(),
            })
    }
}

// -----------------------------------------------------------------------------
// Constructor

pub(crate) struct ParamDecl {
    pub(crate) name: &'static str,
    pub(crate) default: Option<(DefaultFn, TypeId, &'static str)>,
}

enum Call<T> {
    Args(fn(&mut ConstructorArgs<'_>) -> Result<T, DecodeError>),
    Plain(fn() -> T),
}

/// A constructor declaration, passed to
/// [`ModelBuilder::constructor`](crate::ModelBuilder::constructor).
///
/// Parameters are listed in call order by member name.
///
/// ```ignore
/// builder.constructor(
///     Constructor::new(|args| Ok(Person::new(args.take(0)?, args.take(1)?)))
///         .param("id")
///         .param("name")
///         .preferred(),
/// );
/// ```
pub struct Constructor<T> {
    call: Call<T>,
    pub(crate) params: Vec<ParamDecl>,
    pub(crate) preferred: bool,
}

impl<T: Record> Constructor<T> {
    /// A constructor reading its arguments from [`ConstructorArgs`].
    #[inline]
    pub fn new(call: fn(&mut ConstructorArgs<'_>) -> Result<T, DecodeError>) -> Self {
        Self {
            call: Call::Args(call),
            params: Vec::new(),
            preferred: false,
        }
    }

    /// A constructor taking no arguments.
    #[inline]
    pub fn parameterless(call: fn() -> T) -> Self {
        Self {
            call: Call::Plain(call),
            params: Vec::new(),
            preferred: false,
        }
    }

    pub fn param(mut self, name: &'static str) -> Self {
        self.params.push(ParamDecl {
            name,
            default: None,
        });
        self
    }

    /// A parameter whose absent key is filled by `default`.
    ///
    /// `S` must be the declared type of the bound member.
    pub fn param_default<S: Send + Sync + 'static>(mut self, name: &'static str, default: fn() -> S) -> Self {
        let default: DefaultFn = Arc::new(move || Box::new(default()) as Box<dyn Any>);
        self.params.push(ParamDecl {
            name,
            default: Some((default, TypeId::of::<S>(), type_name::<S>())),
        });
        self
    }

    /// Marks this constructor as the one to use.
    pub fn preferred(mut self) -> Self {
        self.preferred = true;
        self
    }

    pub(crate) fn into_invoke(self) -> (InvokeFn, Vec<ParamDecl>, bool) {
        let invoke: InvokeFn = match self.call {
            Call::Args(call) => Arc::new(move |args: &mut ConstructorArgs<'_>| {
                call(args).map(|v| Box::new(v) as Box<dyn AnyRecord>)
            }),
            Call::Plain(call) => {
                Arc::new(move |_: &mut ConstructorArgs<'_>| Ok(Box::new(call()) as Box<dyn AnyRecord>))
            }
        };
        (invoke, self.params, self.preferred)
    }
}
