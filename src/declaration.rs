//! Declaration metadata for native-call sites.
//!
//! A [`Declaration`] is the unit of work for every check: one per native
//! entry point declared by the bindings, carrying the target library, the
//! expected symbol name, the marshaled signature shapes, and the platform
//! availability window the binding generator recorded for it.
//!
//! Availability is modeled as a tagged configuration record
//! ([`Availability`]) rather than runtime-polymorphic attributes: the data
//! is read once at extraction time and only ever consulted as a filter
//! predicate.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use std::fmt;

bitflags! {
    /// Platforms a declaration is scoped to.
    ///
    /// An empty mask means "no restriction" (available everywhere).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Platforms: u8 {
        /// macOS / Mac Catalyst hosts.
        const MACOS = 1 << 0;
        /// iOS devices and simulators.
        const IOS = 1 << 1;
        /// tvOS devices and simulators.
        const TVOS = 1 << 2;
        /// watchOS devices and simulators.
        const WATCHOS = 1 << 3;
    }
}

impl Default for Platforms {
    fn default() -> Self {
        Self::empty()
    }
}

impl<'de> Deserialize<'de> for Platforms {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let names = Vec::<String>::deserialize(deserializer)?;
        let mut mask = Self::empty();
        for name in names {
            match name.as_str() {
                "macos" => mask |= Self::MACOS,
                "ios" => mask |= Self::IOS,
                "tvos" => mask |= Self::TVOS,
                "watchos" => mask |= Self::WATCHOS,
                other => {
                    return Err(serde::de::Error::custom(format!(
                        "unknown platform name: {other}"
                    )))
                }
            }
        }
        Ok(mask)
    }
}

impl Serialize for Platforms {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut names = Vec::new();
        if self.contains(Self::MACOS) {
            names.push("macos");
        }
        if self.contains(Self::IOS) {
            names.push("ios");
        }
        if self.contains(Self::TVOS) {
            names.push("tvos");
        }
        if self.contains(Self::WATCHOS) {
            names.push("watchos");
        }
        names.serialize(serializer)
    }
}

/// A single platform, used as the target of an availability query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// macOS / Mac Catalyst.
    MacOs,
    /// iOS.
    Ios,
    /// tvOS.
    TvOs,
    /// watchOS.
    WatchOs,
}

impl Platform {
    /// The mask bit corresponding to this platform.
    #[must_use]
    pub const fn mask(self) -> Platforms {
        match self {
            Self::MacOs => Platforms::MACOS,
            Self::Ios => Platforms::IOS,
            Self::TvOs => Platforms::TVOS,
            Self::WatchOs => Platforms::WATCHOS,
        }
    }
}

/// An OS version as `major.minor`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct OsVersion {
    /// Major version component.
    pub major: u16,
    /// Minor version component.
    pub minor: u16,
}

impl OsVersion {
    /// Create a version from components.
    #[must_use]
    pub const fn new(major: u16, minor: u16) -> Self {
        Self { major, minor }
    }
}

impl fmt::Display for OsVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

/// Availability window recorded by the binding generator for a declaration.
///
/// This is pure data: `permits` is a side-effect-free predicate, evaluated
/// once per declaration when the skip policy filters the manifest.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Availability {
    /// Platforms the declaration is restricted to (empty = all).
    pub platforms: Platforms,
    /// First OS version the entry point exists in, if constrained.
    pub introduced: Option<OsVersion>,
    /// OS version the entry point was removed in, if any.
    pub obsoleted: Option<OsVersion>,
    /// Marked unavailable outright (never resolvable on any target).
    pub unavailable: bool,
}

impl Availability {
    /// Whether this declaration is expected to resolve on the given target.
    #[must_use]
    pub fn permits(&self, platform: Platform, version: OsVersion) -> bool {
        if self.unavailable {
            return false;
        }
        if !self.platforms.is_empty() && !self.platforms.contains(platform.mask()) {
            return false;
        }
        if let Some(introduced) = self.introduced {
            if version < introduced {
                return false;
            }
        }
        if let Some(obsoleted) = self.obsoleted {
            if version >= obsoleted {
                return false;
            }
        }
        true
    }
}

/// The marshaled shape of a parameter or return slot.
///
/// Shapes carry exactly the structure the signature rules need: one level
/// of by-ref indirection, generic-ness with a delegate marker, and the
/// native-width flag on enumerated types.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TypeShape {
    /// No value (return slot of a void function).
    Void,
    /// A plain scalar or struct passed by value.
    Scalar {
        /// Type name as declared.
        name: String,
    },
    /// An opaque pointer or handle.
    Pointer {
        /// Pointee type name as declared.
        name: String,
    },
    /// One level of by-reference indirection around another shape.
    ByRef {
        /// The wrapped shape.
        inner: Box<TypeShape>,
    },
    /// A parameterized (generic) type.
    Generic {
        /// Type name including its arguments, e.g. `GenericBox<Action>`.
        name: String,
        /// True when the type derives from the platform delegate abstraction.
        delegate: bool,
    },
    /// An enumerated type.
    Enum {
        /// Type name as declared.
        name: String,
        /// True when marked with a native (pointer-width) representation.
        native: bool,
    },
    /// A non-generic delegate/callable type.
    Delegate {
        /// Type name as declared.
        name: String,
    },
}

impl TypeShape {
    /// Strip exactly one level of by-reference indirection.
    ///
    /// `ref` is fine on its own but it can hide the shapes the signature
    /// rules are looking for.
    #[must_use]
    pub fn strip_by_ref(&self) -> &Self {
        match self {
            Self::ByRef { inner } => inner,
            other => other,
        }
    }

    /// Convenience constructor for a scalar shape.
    #[must_use]
    pub fn scalar(name: impl Into<String>) -> Self {
        Self::Scalar { name: name.into() }
    }

    /// Convenience constructor for a by-ref wrapper.
    #[must_use]
    pub fn by_ref(inner: Self) -> Self {
        Self::ByRef {
            inner: Box::new(inner),
        }
    }
}

impl fmt::Display for TypeShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Void => write!(f, "void"),
            Self::Scalar { name } | Self::Enum { name, .. } | Self::Delegate { name } => {
                write!(f, "{name}")
            }
            Self::Pointer { name } => write!(f, "{name}*"),
            Self::ByRef { inner } => write!(f, "ref {inner}"),
            Self::Generic { name, .. } => write!(f, "{name}"),
        }
    }
}

/// A named parameter slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Param {
    /// Parameter name as declared.
    pub name: String,
    /// Marshaled shape.
    pub shape: TypeShape,
}

impl Param {
    /// Create a parameter from a name and shape.
    #[must_use]
    pub fn new(name: impl Into<String>, shape: TypeShape) -> Self {
        Self {
            name: name.into(),
            shape,
        }
    }
}

/// One native-call site declared by the bindings.
///
/// Immutable once extracted; every check consumes declarations by shared
/// reference and records findings elsewhere.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Declaration {
    /// Fully qualified name of the declaring type.
    pub owning_type: String,
    /// Method name at the call site.
    pub method: String,
    /// Logical identifier of the target native library.
    pub library: String,
    /// Declared entry point; `None` means the method name is the symbol.
    #[serde(default)]
    pub entry_point: Option<String>,
    /// Parameter slots in declaration order.
    #[serde(default)]
    pub params: Vec<Param>,
    /// Return slot shape.
    #[serde(default = "default_return")]
    pub return_type: TypeShape,
    /// Platform availability window.
    #[serde(default)]
    pub availability: Availability,
}

fn default_return() -> TypeShape {
    TypeShape::Void
}

impl Declaration {
    /// The symbol name this declaration expects to resolve.
    #[must_use]
    pub fn entry_point(&self) -> &str {
        self.entry_point.as_deref().unwrap_or(&self.method)
    }

    /// Minimal constructor used by checks and fixtures.
    #[must_use]
    pub fn new(
        owning_type: impl Into<String>,
        method: impl Into<String>,
        library: impl Into<String>,
    ) -> Self {
        Self {
            owning_type: owning_type.into(),
            method: method.into(),
            library: library.into(),
            entry_point: None,
            params: Vec::new(),
            return_type: TypeShape::Void,
            availability: Availability::default(),
        }
    }

    /// Set the declared entry point.
    #[must_use]
    pub fn with_entry_point(mut self, entry_point: impl Into<String>) -> Self {
        self.entry_point = Some(entry_point.into());
        self
    }

    /// Append a parameter slot.
    #[must_use]
    pub fn with_param(mut self, name: impl Into<String>, shape: TypeShape) -> Self {
        self.params.push(Param::new(name, shape));
        self
    }

    /// Set the return slot shape.
    #[must_use]
    pub fn with_return(mut self, shape: TypeShape) -> Self {
        self.return_type = shape;
        self
    }

    /// Set the availability record.
    #[must_use]
    pub fn with_availability(mut self, availability: Availability) -> Self {
        self.availability = availability;
        self
    }
}
