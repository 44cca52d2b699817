// component.rs - Closed set of component kinds
//
// Every component kind is declared once through `component_kinds!`, which
// generates the `Components` aggregate holding one typed store per kind.
// There is no runtime registration: adding a kind means adding a line to the
// declaration in `components.rs`.

use crate::ecs::{ComponentKind, ComponentStore, Components};

/// Typed data attached zero-or-one-per-kind to an entity.
pub trait Component: 'static + Sized {
    /// Which kind this type is.
    const KIND: ComponentKind;

    /// The store holding every value of this kind.
    fn store(components: &Components) -> &ComponentStore<Self>;

    /// Mutable access to the store holding every value of this kind.
    fn store_mut(components: &mut Components) -> &mut ComponentStore<Self>;
}

/// Declare the closed set of component kinds.
///
/// # Example
/// ```ignore
/// component_kinds! {
///     Transform => transforms,
///     Sprite => sprites,
/// }
/// ```
///
/// Each `Type => field` pair adds a `ComponentKind::Type` variant, a
/// `ComponentStore<Type>` field on `Components`, and the `Component` impl
/// routing `Type` to that field.
macro_rules! component_kinds {
    ($($kind:ident => $field:ident),+ $(,)?) => {
        /// Name of every component kind known to the world.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum ComponentKind {
            $($kind),+
        }

        impl ComponentKind {
            /// All kinds, in declaration order.
            pub const ALL: &'static [ComponentKind] = &[$(ComponentKind::$kind),+];

            pub fn name(self) -> &'static str {
                match self {
                    $(ComponentKind::$kind => stringify!($kind)),+
                }
            }
        }

        impl ::std::fmt::Display for ComponentKind {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.name())
            }
        }

        /// One typed store per component kind.
        #[derive(Debug, Default)]
        pub struct Components {
            $($field: $crate::ecs::ComponentStore<$kind>),+
        }

        impl Components {
            /// Drop every component owned by `entity`.
            pub(crate) fn purge(&mut self, entity: $crate::ecs::Entity) {
                $(self.$field.remove(entity);)+
            }

            /// Kinds present on `entity`, in declaration order.
            pub(crate) fn kinds_of(&self, entity: $crate::ecs::Entity) -> Vec<ComponentKind> {
                let mut kinds = Vec::new();
                $(
                    if self.$field.contains(entity) {
                        kinds.push(ComponentKind::$kind);
                    }
                )+
                kinds
            }

            /// Total number of stored values across all kinds.
            pub(crate) fn total(&self) -> usize {
                0 $(+ self.$field.len())+
            }

            pub(crate) fn clear(&mut self) {
                $(self.$field.clear();)+
            }
        }

        $(
            impl $crate::ecs::Component for $kind {
                const KIND: ComponentKind = ComponentKind::$kind;

                #[inline]
                fn store(components: &Components) -> &$crate::ecs::ComponentStore<Self> {
                    &components.$field
                }

                #[inline]
                fn store_mut(components: &mut Components) -> &mut $crate::ecs::ComponentStore<Self> {
                    &mut components.$field
                }
            }
        )+
    };
}

pub(crate) use component_kinds;
