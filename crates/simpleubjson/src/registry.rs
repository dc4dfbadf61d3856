//! Host value adaptation.
//!
//! [`Value`] is closed; anything else goes through a [`Registry`] that maps a
//! host type to a handler producing a `Value`. Lookup order:
//!
//! 1. the [`Noop`] sentinel, which cannot be overridden,
//! 2. an exact `TypeId` entry,
//! 3. the first category whose predicate accepts the value, in registration
//!    order (first match, not best match),
//! 4. the default handler, if one was supplied.
//!
//! Otherwise the value is rejected with [`EncodeError::UnsupportedType`].

use std::any::{type_name, Any, TypeId};
use std::borrow::Cow;
use std::collections::HashMap;
use std::rc::Rc;
use std::sync::Arc;

use tracing::{debug, trace};

use crate::error::EncodeError;
use crate::value::{Noop, Value};

/// Type-erased adapter from a host value to a [`Value`].
pub type Handler = Arc<dyn Fn(&dyn Any, &Registry) -> Result<Value, EncodeError> + Send + Sync>;

/// Capability test used by category entries.
pub type Predicate = Arc<dyn Fn(&dyn Any) -> bool + Send + Sync>;

#[derive(Clone)]
struct Category {
    name: &'static str,
    matches: Predicate,
    handler: Handler,
}

/// Caller-supplied handler overrides, merged over the built-ins when an
/// [`Encoder`](crate::Encoder) is constructed.
///
/// ```
/// use simpleubjson::{Encoder, Handlers, Value};
///
/// struct Celsius(f64);
///
/// let encoder = Encoder::with_handlers(
///     Handlers::new().insert(|c: &Celsius, _| Ok(Value::Float(c.0))),
/// );
/// assert_eq!(encoder.encode_native(&Celsius(0.5)).unwrap(), [b'd', 0x3f, 0, 0, 0]);
/// ```
#[derive(Clone, Default)]
pub struct Handlers {
    exact: HashMap<TypeId, Handler>,
    categories: Vec<Category>,
    default: Option<Handler>,
}

impl Handlers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an exact handler for `T`, replacing any built-in one.
    pub fn insert<T, F>(mut self, handler: F) -> Self
    where
        T: Any,
        F: Fn(&T, &Registry) -> Result<Value, EncodeError> + Send + Sync + 'static,
    {
        self.exact.insert(TypeId::of::<T>(), typed(handler));
        self
    }

    /// Registers a category consulted after exact lookups fail.
    pub fn category<P, F>(mut self, name: &'static str, matches: P, handler: F) -> Self
    where
        P: Fn(&dyn Any) -> bool + Send + Sync + 'static,
        F: Fn(&dyn Any, &Registry) -> Result<Value, EncodeError> + Send + Sync + 'static,
    {
        self.categories.push(Category {
            name,
            matches: Arc::new(matches),
            handler: Arc::new(handler),
        });
        self
    }

    /// Handler for values nothing else matched.
    pub fn default_handler<F>(mut self, handler: F) -> Self
    where
        F: Fn(&dyn Any, &Registry) -> Result<Value, EncodeError> + Send + Sync + 'static,
    {
        self.default = Some(Arc::new(handler));
        self
    }
}

fn typed<T, F>(handler: F) -> Handler
where
    T: Any,
    F: Fn(&T, &Registry) -> Result<Value, EncodeError> + Send + Sync + 'static,
{
    Arc::new(move |value: &dyn Any, registry: &Registry| match value.downcast_ref::<T>() {
        Some(value) => handler(value, registry),
        None => Err(EncodeError::UnsupportedType {
            type_name: type_name::<T>().to_owned(),
        }),
    })
}

/// Frozen handler table. Built once per encoder and only read afterwards.
pub struct Registry {
    noop: Handler,
    exact: HashMap<TypeId, Handler>,
    categories: Vec<Category>,
    default: Option<Handler>,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new(Handlers::new())
    }
}

impl Registry {
    /// Built-in handlers with `overrides` merged on top. Caller categories
    /// are consulted before the built-in ones.
    pub fn new(overrides: Handlers) -> Self {
        let builtin = builtin_handlers();
        let mut exact = builtin.exact;
        exact.extend(overrides.exact);
        let mut categories = overrides.categories;
        categories.extend(builtin.categories);
        Self {
            noop: Arc::new(|_: &dyn Any, _: &Registry| Ok(Value::Noop)),
            exact,
            categories,
            default: overrides.default,
        }
    }

    /// Picks the handler for a host value.
    pub fn resolve(&self, value: &dyn Any, type_name: &str) -> Result<&Handler, EncodeError> {
        if value.is::<Noop>() {
            return Ok(&self.noop);
        }
        if let Some(handler) = self.exact.get(&value.type_id()) {
            trace!(type_name, "exact handler");
            return Ok(handler);
        }
        if let Some(category) = self.categories.iter().find(|c| (c.matches)(value)) {
            debug!(type_name, category = category.name, "category handler");
            return Ok(&category.handler);
        }
        match &self.default {
            Some(handler) => {
                debug!(type_name, "default handler");
                Ok(handler)
            }
            None => Err(EncodeError::UnsupportedType {
                type_name: type_name.to_owned(),
            }),
        }
    }

    /// Converts a host value into a [`Value`] through its handler.
    pub fn adapt<T: Any>(&self, value: &T) -> Result<Value, EncodeError> {
        self.adapt_dyn(value, type_name::<T>())
    }

    /// Like [`adapt`](Self::adapt) for an already erased value.
    pub fn adapt_dyn(&self, value: &dyn Any, type_name: &str) -> Result<Value, EncodeError> {
        let handler = self.resolve(value, type_name)?;
        handler(value, self)
    }
}

macro_rules! int_handlers {
    ($handlers:ident, $($t:ty),*) => {
        $($handlers = $handlers.insert(|v: &$t, _| Ok(Value::from(*v)));)*
    };
}

fn builtin_handlers() -> Handlers {
    let mut handlers = Handlers::new()
        .insert(|_: &(), _| Ok(Value::Null))
        .insert(|v: &bool, _| Ok(Value::Bool(*v)))
        .insert(|v: &f32, _| Ok(Value::from(*v)))
        .insert(|v: &f64, _| Ok(Value::Float(*v)))
        .insert(|v: &String, _| Ok(Value::String(v.clone())))
        .insert(|v: &&'static str, _| Ok(Value::from(*v)))
        .insert(|v: &serde_json::Value, _| Ok(Value::from(v.clone())))
        .insert(|v: &serde_json::Number, _| Ok(Value::from(v.clone())));
    int_handlers!(handlers, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);
    handlers
        .category("string-like", is_string_like, |v, _| {
            string_like(v).map(Value::String).ok_or_else(|| EncodeError::UnsupportedType {
                type_name: "string-like".to_owned(),
            })
        })
        .category("json-collection", is_json_collection, |v, _| {
            if let Some(items) = v.downcast_ref::<Vec<serde_json::Value>>() {
                Ok(Value::SizedArray(items.iter().cloned().map(Value::from).collect()))
            } else if let Some(map) = v.downcast_ref::<serde_json::Map<String, serde_json::Value>>() {
                Ok(Value::from(serde_json::Value::Object(map.clone())))
            } else {
                Err(EncodeError::UnsupportedType {
                    type_name: "json-collection".to_owned(),
                })
            }
        })
}

fn is_string_like(v: &dyn Any) -> bool {
    v.is::<Box<str>>()
        || v.is::<Rc<str>>()
        || v.is::<Arc<str>>()
        || v.is::<Cow<'static, str>>()
        || v.is::<char>()
}

fn string_like(v: &dyn Any) -> Option<String> {
    if let Some(s) = v.downcast_ref::<Box<str>>() {
        Some(s.to_string())
    } else if let Some(s) = v.downcast_ref::<Rc<str>>() {
        Some(s.to_string())
    } else if let Some(s) = v.downcast_ref::<Arc<str>>() {
        Some(s.to_string())
    } else if let Some(s) = v.downcast_ref::<Cow<'static, str>>() {
        Some(s.to_string())
    } else {
        v.downcast_ref::<char>().map(char::to_string)
    }
}

fn is_json_collection(v: &dyn Any) -> bool {
    v.is::<Vec<serde_json::Value>>() || v.is::<serde_json::Map<String, serde_json::Value>>()
}
