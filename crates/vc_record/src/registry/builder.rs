use alloc::boxed::Box;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::any::{Any, TypeId, type_name};
use core::marker::PhantomData;
use std::sync::OnceLock;

use super::{ModelError, ParentLink, Record};
use crate::TriState;
use crate::codec::NameTable;
use crate::info::{
    CaptureField, CaptureSlot, Constructor, ConstructorInfo, DefaultFn, IgnorePolicy,
    InheritedCapture, InheritedMember, InvokeFn, MemberAccess, MemberFlags, MemberInfo,
    NamingPolicy, ParamDecl, ParameterInfo, ParentModel, PlainMember, Polymorphism, TagSpec,
    TypeModel, VariantInfo, WrappedMember,
};
use crate::value::{CaptureMap, Tag, Wire};

// -----------------------------------------------------------------------------
// Declarations

struct MemberDecl {
    name: &'static str,
    rename: Option<&'static str>,
    type_name: &'static str,
    type_id: TypeId,
    flags: MemberFlags,
    ignore: IgnorePolicy,
    default: Option<DefaultFn>,
    tag: Option<TagSpec>,
    access: Arc<dyn MemberAccess>,
}

struct CtorDecl {
    invoke: InvokeFn,
    params: Vec<ParamDecl>,
    preferred: bool,
}

struct VariantDecl {
    info: VariantInfo,
    parent: fn() -> Option<ParentLink>,
}

fn tag_of<D: Tag>(value: &dyn Any) -> Option<&str> {
    value.downcast_ref::<D>().map(Tag::tag)
}

// -----------------------------------------------------------------------------
// ModelBuilder

/// Collects the declarations of a [`Record`] and turns them into a
/// [`TypeModel`].
///
/// Handed to [`Record::describe`]. Errors found while declaring, such as a
/// capture slot of the wrong type, are kept and reported when the model is
/// built.
pub struct ModelBuilder<T> {
    naming: NamingPolicy,
    members: Vec<MemberDecl>,
    constructors: Vec<CtorDecl>,
    capture: Option<CaptureSlot>,
    polymorphic: bool,
    variants: Vec<VariantDecl>,
    error: Option<ModelError>,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Record> ModelBuilder<T> {
    fn new() -> Self {
        Self {
            naming: NamingPolicy::Verbatim,
            members: Vec::new(),
            constructors: Vec::new(),
            capture: None,
            polymorphic: false,
            variants: Vec::new(),
            error: None,
            _marker: PhantomData,
        }
    }

    fn fail(&mut self, error: ModelError) {
        if self.error.is_none() {
            self.error = Some(error);
        }
    }

    /// Sets the policy deriving wire keys from member names.
    pub fn naming(&mut self, policy: NamingPolicy) -> &mut Self {
        self.naming = policy;
        self
    }

    fn push(&mut self, decl: MemberDecl) -> &mut MemberDecl {
        self.members.push(decl);
        let last = self.members.len() - 1;
        &mut self.members[last]
    }

    /// Declares a member stored directly as an `F`.
    pub fn plain<F: Wire>(
        &mut self,
        name: &'static str,
        get: fn(&T) -> &F,
        get_mut: fn(&mut T) -> &mut F,
    ) -> MemberOptions<'_, F> {
        let mut flags = MemberFlags::READ | MemberFlags::WRITE;
        flags.set(MemberFlags::NULLABLE, F::NULLABLE);
        let decl = self.push(MemberDecl {
            name,
            rename: None,
            type_name: type_name::<F>(),
            type_id: TypeId::of::<F>(),
            flags,
            ignore: IgnorePolicy::Never,
            default: None,
            tag: None,
            access: Arc::new(PlainMember::new(get, get_mut)),
        });
        MemberOptions::new(decl)
    }

    /// Declares a member stored as a `TriState<U>`.
    pub fn wrapped<U: Wire>(
        &mut self,
        name: &'static str,
        get: fn(&T) -> &TriState<U>,
        get_mut: fn(&mut T) -> &mut TriState<U>,
    ) -> MemberOptions<'_, TriState<U>> {
        let decl = self.push(MemberDecl {
            name,
            rename: None,
            type_name: type_name::<TriState<U>>(),
            type_id: TypeId::of::<TriState<U>>(),
            flags: MemberFlags::all().difference(MemberFlags::REQUIRED | MemberFlags::DISCRIMINATOR),
            ignore: IgnorePolicy::Never,
            default: None,
            tag: None,
            access: Arc::new(WrappedMember::new(get, get_mut)),
        });
        MemberOptions::new(decl)
    }

    /// Declares the discriminator of a polymorphic root, stored as a `D`.
    pub fn discriminator<D: Tag>(
        &mut self,
        name: &'static str,
        get: fn(&T) -> &D,
        get_mut: fn(&mut T) -> &mut D,
    ) -> MemberOptions<'_, D> {
        let mut options = self.plain(name, get, get_mut);
        options.mark_discriminator::<D>();
        options
    }

    /// Declares the discriminator of a polymorphic root, stored as a
    /// `TriState<D>`.
    pub fn wrapped_discriminator<D: Tag>(
        &mut self,
        name: &'static str,
        get: fn(&T) -> &TriState<D>,
        get_mut: fn(&mut T) -> &mut TriState<D>,
    ) -> MemberOptions<'_, TriState<D>> {
        let mut options = self.wrapped(name, get, get_mut);
        options.mark_discriminator::<D>();
        options
    }

    /// Declares the slot collecting unmatched keys.
    ///
    /// `F` must be [`CaptureMap`]. Only the first declared slot is used.
    pub fn capture<F: Send + Sync + 'static>(
        &mut self,
        name: &'static str,
        get: fn(&T) -> &F,
        get_mut: fn(&mut T) -> &mut F,
    ) -> &mut Self {
        let found = TypeId::of::<F>();
        if found == TypeId::of::<TriState<CaptureMap>>() {
            self.fail(ModelError::WrappedCaptureSlot {
                type_name: type_name::<T>(),
                member: name,
            });
        } else if found != TypeId::of::<CaptureMap>() {
            self.fail(ModelError::InvalidCaptureSlot {
                type_name: type_name::<T>(),
                member: name,
                found: type_name::<F>(),
            });
        } else if self.capture.is_none() {
            self.capture = Some(CaptureSlot {
                name,
                declaring_type: type_name::<T>(),
                access: Arc::new(CaptureField::new(get, get_mut)),
            });
        }
        self
    }

    /// Registers [`Default::default`] as the parameterless constructor.
    pub fn default_constructor(&mut self) -> &mut Self
    where
        T: Default,
    {
        self.constructor(Constructor::parameterless(T::default))
    }

    /// Registers a constructor candidate.
    pub fn constructor(&mut self, constructor: Constructor<T>) -> &mut Self {
        let (invoke, params, preferred) = constructor.into_invoke();
        self.constructors.push(CtorDecl {
            invoke,
            params,
            preferred,
        });
        self
    }

    /// Marks this type as a polymorphic root.
    pub fn polymorphic(&mut self) -> &mut Self {
        self.polymorphic = true;
        self
    }

    /// Registers the derived type `D` under `tag`.
    ///
    /// `D` must descend from this type through parent links. One type may
    /// be registered under several tags.
    pub fn variant<D: Record>(&mut self, tag: &'static str) -> &mut Self {
        self.polymorphic = true;
        self.variants.push(VariantDecl {
            info: VariantInfo {
                tag,
                type_id: TypeId::of::<D>(),
                type_name: type_name::<D>(),
                model: D::type_model,
            },
            parent: D::parent,
        });
        self
    }
}

// -----------------------------------------------------------------------------
// Build

impl<T: Record> ModelBuilder<T> {
    /// Describes and builds the model of `T`, without caching it.
    pub(crate) fn build() -> Result<TypeModel, ModelError> {
        let mut builder = Self::new();
        T::describe(&mut builder);
        builder.finish()
    }

    fn finish(self) -> Result<TypeModel, ModelError> {
        let type_name = type_name::<T>();
        let type_id = TypeId::of::<T>();
        if let Some(error) = self.error {
            return Err(error);
        }

        let parent = match T::parent() {
            Some(link) => {
                let model = (link.model)().map_err(|e| ModelError::Parent {
                    type_name,
                    source: Box::new(e),
                })?;
                Some(ParentModel { link, model })
            }
            None => None,
        };

        let naming = self.naming;
        let mut members: Vec<MemberInfo> = self
            .members
            .into_iter()
            .map(|decl| MemberInfo {
                name: decl.name,
                key: match decl.rename {
                    Some(key) => Box::from(key),
                    None => naming.apply(decl.name).into_boxed_str(),
                },
                type_name: decl.type_name,
                type_id: decl.type_id,
                flags: decl.flags,
                ignore: decl.ignore,
                declaring_type: type_name,
                declaring_id: type_id,
                parameter: None,
                default: decl.default,
                tag: decl.tag,
                access: decl.access,
            })
            .collect();

        // Inherited members keep the parent's keys; a declared member of the
        // same name shadows them.
        if let Some(parent) = &parent {
            let declared = members.len();
            for member in parent.model.members() {
                if members[..declared].iter().any(|m| m.name == member.name) {
                    continue;
                }
                let mut inherited = member.clone();
                inherited.parameter = None;
                inherited.access = Arc::new(InheritedMember::new(
                    member.access.clone(),
                    parent.link.upcast.clone(),
                    type_name,
                ));
                members.push(inherited);
            }
        }

        for (i, member) in members.iter().enumerate() {
            if members[..i].iter().any(|m| m.key == member.key) {
                return Err(ModelError::DuplicateMember {
                    type_name,
                    key: member.key.to_string(),
                });
            }
        }

        let ctor = select_constructor(type_name, self.constructors)?;
        let (members, params) = bind_parameters(type_name, naming, members, ctor.params)?;
        let constructor = ConstructorInfo {
            params: params.into_boxed_slice(),
            preferred: ctor.preferred,
            invoke: ctor.invoke,
        };

        let capture = match (self.capture, &parent) {
            (Some(slot), _) => Some(slot),
            (None, Some(parent)) => parent.model.capture().map(|slot| CaptureSlot {
                name: slot.name,
                declaring_type: slot.declaring_type,
                access: Arc::new(InheritedCapture::new(
                    slot.access.clone(),
                    parent.link.upcast.clone(),
                )),
            }),
            (None, None) => None,
        };

        let polymorphism = if self.polymorphic {
            Some(build_polymorphism(type_name, type_id, &members, self.variants)?)
        } else {
            None
        };

        let names = NameTable::new(members.iter().map(|m| &*m.key));

        log::debug!(
            "built type model for `{type_name}`: {} member(s), {} constructor parameter(s)",
            members.len(),
            constructor.params.len(),
        );

        Ok(TypeModel {
            type_id,
            type_name,
            naming,
            members: members.into_boxed_slice(),
            constructor,
            capture,
            parent,
            polymorphism,
            names,
        })
    }
}

/// A preferred constructor wins, then a sole one, then a parameterless one.
fn select_constructor(type_name: &'static str, mut ctors: Vec<CtorDecl>) -> Result<CtorDecl, ModelError> {
    let preferred = ctors.iter().filter(|c| c.preferred).count();
    let index = if preferred == 1 {
        ctors.iter().position(|c| c.preferred)
    } else if preferred > 1 {
        return Err(ModelError::AmbiguousConstructor {
            type_name,
            count: preferred,
        });
    } else if ctors.len() == 1 {
        Some(0)
    } else {
        let mut parameterless = ctors
            .iter()
            .enumerate()
            .filter(|(_, c)| c.params.is_empty())
            .map(|(i, _)| i);
        match (parameterless.next(), parameterless.next()) {
            (Some(i), None) => Some(i),
            _ if ctors.is_empty() => None,
            _ => {
                return Err(ModelError::AmbiguousConstructor {
                    type_name,
                    count: ctors.len(),
                });
            }
        }
    };
    match index {
        Some(i) => Ok(ctors.swap_remove(i)),
        None => Err(ModelError::NoConstructor { type_name }),
    }
}

/// Binds each parameter to a member and moves bound members to the front,
/// in parameter order.
fn bind_parameters(
    type_name: &'static str,
    naming: NamingPolicy,
    members: Vec<MemberInfo>,
    decls: Vec<ParamDecl>,
) -> Result<(Vec<MemberInfo>, Vec<ParameterInfo>), ModelError> {
    let mut bound: Vec<usize> = Vec::with_capacity(decls.len());
    let mut params = Vec::with_capacity(decls.len());

    for (index, decl) in decls.into_iter().enumerate() {
        let key = naming.apply(decl.name);
        let position = members
            .iter()
            .position(|m| m.name == decl.name)
            .or_else(|| members.iter().position(|m| *m.key == *key))
            .filter(|p| !bound.contains(p))
            .ok_or(ModelError::UnmatchedParameter {
                type_name,
                parameter: decl.name,
            })?;
        let member = &members[position];

        let default = match decl.default {
            Some((default, id, _)) if id == member.type_id => Some(default),
            Some((_, _, found)) => {
                log::debug!("default of `{}` in `{type_name}` is a `{found}`", decl.name);
                return Err(ModelError::DefaultTypeMismatch {
                    type_name,
                    parameter: decl.name,
                    expected: member.type_name,
                });
            }
            None => member.default.clone().or_else(|| {
                let unset = member.access.implicit_default()?;
                Some(Arc::new(unset) as DefaultFn)
            }),
        };

        bound.push(position);
        params.push(ParameterInfo {
            name: decl.name,
            member: index,
            type_name: member.type_name,
            default,
        });
    }

    let mut slots: Vec<Option<MemberInfo>> = members.into_iter().map(Some).collect();
    let mut ordered = Vec::with_capacity(slots.len());
    for (index, &position) in bound.iter().enumerate() {
        if let Some(mut member) = slots[position].take() {
            member.parameter = Some(index);
            ordered.push(member);
        }
    }
    ordered.extend(slots.into_iter().flatten());
    Ok((ordered, params))
}

fn build_polymorphism(
    type_name: &'static str,
    type_id: TypeId,
    members: &[MemberInfo],
    variants: Vec<VariantDecl>,
) -> Result<Polymorphism, ModelError> {
    let discriminator = members
        .iter()
        .position(MemberInfo::is_discriminator)
        .ok_or(ModelError::MissingDiscriminator { type_name })?;
    let tolerates_unknown = members[discriminator]
        .tag
        .is_some_and(|spec| spec.tolerates_unknown);

    for (i, variant) in variants.iter().enumerate() {
        if variants[..i].iter().any(|v| v.info.tag == variant.info.tag) {
            return Err(ModelError::DuplicateTag {
                type_name,
                tag: variant.info.tag.into(),
            });
        }
        let descends = (variant.parent)().is_some_and(|link| link.reaches(type_id));
        if !descends {
            return Err(ModelError::NotASubtype {
                root: type_name,
                variant: variant.info.type_name,
            });
        }
    }

    Ok(Polymorphism {
        discriminator,
        tolerates_unknown,
        variants: variants.into_iter().map(|v| v.info).collect(),
        table: OnceLock::new(),
    })
}

// -----------------------------------------------------------------------------
// MemberOptions

/// Per-member options, returned by the member declarations of
/// [`ModelBuilder`].
pub struct MemberOptions<'a, F> {
    decl: &'a mut MemberDecl,
    _marker: PhantomData<fn() -> F>,
}

impl<'a, F: Send + Sync + 'static> MemberOptions<'a, F> {
    fn new(decl: &'a mut MemberDecl) -> Self {
        Self {
            decl,
            _marker: PhantomData,
        }
    }

    fn mark_discriminator<D: Tag>(&mut self) {
        self.decl.flags.insert(MemberFlags::DISCRIMINATOR);
        self.decl.tag = Some(TagSpec {
            read: tag_of::<D>,
            tolerates_unknown: D::TOLERATES_UNKNOWN,
        });
    }

    /// Decoding fails when the key is absent.
    pub fn required(self) -> Self {
        self.decl.flags.insert(MemberFlags::REQUIRED);
        self
    }

    /// Uses `key` on the wire instead of the policy-derived key.
    pub fn rename(self, key: &'static str) -> Self {
        self.decl.rename = Some(key);
        self
    }

    /// Encoded but never applied by a decode.
    ///
    /// The member can still be bound to a constructor parameter.
    pub fn read_only(self) -> Self {
        self.decl.flags.remove(MemberFlags::WRITE);
        self
    }

    /// Omitted from the output while `Null`.
    pub fn ignore_null(self) -> Self {
        self.decl.ignore = IgnorePolicy::WhenWritingNull;
        self
    }

    /// The value a bound constructor parameter takes when the key is absent.
    pub fn default_value(self, default: fn() -> F) -> Self {
        self.decl.default = Some(Arc::new(move || Box::new(default()) as Box<dyn Any>));
        self
    }
}
