use std::any::{Any, TypeId};
use std::collections::HashSet;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Runtime descriptor of a class in a model hierarchy.
///
/// Identity is the Rust type; the name is only used for display.
#[derive(Clone, Copy)]
pub struct ClassRef {
    id: TypeId,
    name: &'static str,
    bases: &'static [fn() -> ClassRef],
}

impl ClassRef {
    /// Describes `T` with the given direct bases.
    pub fn new<T: ?Sized + 'static>(name: &'static str, bases: &'static [fn() -> ClassRef]) -> Self {
        Self {
            id: TypeId::of::<T>(),
            name,
            bases,
        }
    }

    /// Describes `T` as a root class.
    pub fn root<T: ?Sized + 'static>(name: &'static str) -> Self {
        Self::new::<T>(name, &[])
    }

    pub fn of<T: Class>() -> Self {
        T::class()
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn type_id(&self) -> TypeId {
        self.id
    }

    /// Direct bases, in declaration order.
    pub fn bases(&self) -> impl Iterator<Item = ClassRef> + '_ {
        self.bases.iter().map(|base| base())
    }

    /// True when `self` is `other` or inherits from it, directly or not.
    pub fn is_subclass_of(&self, other: &ClassRef) -> bool {
        self.ancestors().iter().any(|class| class == other)
    }

    /// `self` followed by every ancestor, depth first, each listed once.
    pub fn ancestors(&self) -> Vec<ClassRef> {
        let mut seen = HashSet::new();
        let mut order = Vec::new();
        let mut stack = vec![*self];

        while let Some(class) = stack.pop() {
            if !seen.insert(class.id) {
                continue;
            }
            order.push(class);
            // reversed so the first declared base is visited first
            let bases: Vec<ClassRef> = class.bases().collect();
            stack.extend(bases.into_iter().rev());
        }

        order
    }
}

impl PartialEq for ClassRef {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ClassRef {}

impl Hash for ClassRef {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for ClassRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ClassRef({})", self.name)
    }
}

impl fmt::Display for ClassRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// A type taking part in a class hierarchy.
pub trait Class: Any {
    fn class() -> ClassRef
    where
        Self: Sized;
}

/// A value whose class is known at runtime.
pub trait Instance: Any {
    fn class_ref(&self) -> ClassRef;

    fn is_instance_of(&self, class: &ClassRef) -> bool {
        self.class_ref().is_subclass_of(class)
    }
}

impl<T: Class> Instance for T {
    fn class_ref(&self) -> ClassRef {
        T::class()
    }
}

/// Either a class or a value, as asked of a [`HierarchyMap`](super::HierarchyMap).
///
/// Both forms resolve to a class and go through the same is-a relation, so a
/// value query and a query for the value's class always agree.
#[derive(Clone, Copy)]
pub enum ClassQuery<'a> {
    Type(ClassRef),
    Value(&'a dyn Instance),
}

impl ClassQuery<'_> {
    pub fn class(&self) -> ClassRef {
        match self {
            Self::Type(class) => *class,
            Self::Value(value) => value.class_ref(),
        }
    }
}

impl fmt::Debug for ClassQuery<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Type(class) => f.debug_tuple("Type").field(class).finish(),
            Self::Value(value) => f.debug_tuple("Value").field(&value.class_ref()).finish(),
        }
    }
}

impl From<ClassRef> for ClassQuery<'_> {
    fn from(class: ClassRef) -> Self {
        Self::Type(class)
    }
}

impl<'a> From<&'a dyn Instance> for ClassQuery<'a> {
    fn from(value: &'a dyn Instance) -> Self {
        Self::Value(value)
    }
}

impl<'a, T: Instance> From<&'a T> for ClassQuery<'a> {
    fn from(value: &'a T) -> Self {
        Self::Value(value)
    }
}
