//! Macros for reducing boilerplate when defining entities

/// Implement [`Entity`](crate::core::entity::Entity) for a struct carrying
/// `id`, `created_at` and `updated_at` fields
///
/// # Example
/// ```rust,ignore
/// impl_entity!(Validity, "validities", "Validity");
/// ```
#[macro_export]
macro_rules! impl_entity {
    ($type:ident, $plural:expr, $singular:expr) => {
        impl $crate::core::entity::Entity for $type {
            fn resource_name() -> &'static str {
                $plural
            }

            fn resource_name_singular() -> &'static str {
                $singular
            }

            fn id(&self) -> ::uuid::Uuid {
                self.id
            }

            fn created_at(&self) -> ::chrono::DateTime<::chrono::Utc> {
                self.created_at
            }

            fn updated_at(&self) -> ::chrono::DateTime<::chrono::Utc> {
                self.updated_at
            }

            fn touch(&mut self) {
                self.updated_at = ::chrono::Utc::now();
            }
        }
    };
}

/// Inject the stored-document base fields into a struct
///
/// Injects: `_id`, `createdAt`, `updatedAt`
#[macro_export]
macro_rules! document_struct {
    (
        $(#[$meta:meta])*
        pub struct $type:ident {
            $(
                $(#[$field_meta:meta])*
                pub $field:ident : $field_ty:ty
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, ::serde::Serialize, ::serde::Deserialize)]
        #[serde(rename_all = "camelCase")]
        pub struct $type {
            /// Unique identifier
            #[serde(rename = "_id")]
            pub id: ::uuid::Uuid,

            $(
                $(#[$field_meta])*
                pub $field: $field_ty,
            )*

            /// When this document was created
            pub created_at: ::chrono::DateTime<::chrono::Utc>,

            /// When this document was last updated
            pub updated_at: ::chrono::DateTime<::chrono::Utc>,
        }
    };
}
