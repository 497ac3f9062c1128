//! GraphQL documents sent to the remote platform
//!
//! Every mutation selects its `errors { field message code }` payload so the
//! exporter can tell a rejected entity from a created one.

/// Mutation name and the payload field carrying the created entity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MutationSpec {
    /// Top-level field of the mutation (e.g., `categoryCreate`)
    pub name: &'static str,
    /// Payload field holding the entity (e.g., `category`)
    pub entity: &'static str,
    pub document: &'static str,
}

pub const CATEGORY_CREATE: MutationSpec = MutationSpec {
    name: "categoryCreate",
    entity: "category",
    document: r#"
mutation CategoryCreate($input: CategoryInput!, $parent: ID) {
  categoryCreate(input: $input, parent: $parent) {
    errors {
      field
      message
      code
    }
    category {
      id
      name
      slug
    }
  }
}
"#,
};

pub const PRODUCT_TYPE_CREATE: MutationSpec = MutationSpec {
    name: "productTypeCreate",
    entity: "productType",
    document: r#"
mutation ProductTypeCreate($input: ProductTypeInput!) {
  productTypeCreate(input: $input) {
    errors {
      field
      message
      code
    }
    productType {
      id
      name
      slug
    }
  }
}
"#,
};

pub const PRODUCT_CREATE: MutationSpec = MutationSpec {
    name: "productCreate",
    entity: "product",
    document: r#"
mutation ProductCreate($input: ProductInput!) {
  productCreate(input: $input) {
    errors {
      field
      message
      code
    }
    product {
      id
      name
      slug
      category {
        name
      }
      productType {
        name
      }
    }
  }
}
"#,
};

pub const PRODUCT_VARIANT_CREATE: MutationSpec = MutationSpec {
    name: "productVariantCreate",
    entity: "productVariant",
    document: r#"
mutation ProductVariantCreate($input: ProductVariantInput!) {
  productVariantCreate(input: $input) {
    errors {
      field
      message
      code
    }
    productVariant {
      id
      name
      sku
    }
  }
}
"#,
};

pub const VARIANT_CHANNEL_LISTING_UPDATE: MutationSpec = MutationSpec {
    name: "productVariantChannelListingUpdate",
    entity: "variant",
    document: r#"
mutation VariantChannelListingUpdate($id: ID!, $input: [ProductVariantChannelListingAddInput!]!) {
  productVariantChannelListingUpdate(id: $id, input: $input) {
    errors {
      field
      message
      code
    }
    variant {
      id
    }
  }
}
"#,
};

/// Lightweight read used as the connectivity check
pub const CATEGORIES_QUERY: &str = r#"
query Categories {
  categories(first: 100) {
    edges {
      node {
        id
        name
        slug
        parent {
          id
          name
        }
      }
    }
  }
}
"#;

pub const PRODUCT_TYPES_QUERY: &str = r#"
query ProductTypes {
  productTypes(first: 100) {
    edges {
      node {
        id
        name
        slug
        hasVariants
      }
    }
  }
}
"#;

pub const CHANNELS_QUERY: &str = r#"
query Channels {
  channels {
    id
    name
    slug
    isActive
    currencyCode
  }
}
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_documents_select_errors_and_entity() {
        for spec in [
            CATEGORY_CREATE,
            PRODUCT_TYPE_CREATE,
            PRODUCT_CREATE,
            PRODUCT_VARIANT_CREATE,
            VARIANT_CHANNEL_LISTING_UPDATE,
        ] {
            assert!(spec.document.contains(&format!("{}(", spec.name)));
            assert!(spec.document.contains("errors {"));
            assert!(spec.document.contains(&format!("{} {{", spec.entity)));
        }
    }
}
