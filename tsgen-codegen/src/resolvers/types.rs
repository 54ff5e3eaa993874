use std::{
    collections::{HashMap, HashSet},
    sync::Arc,
};

use tsgen_ir::{
    DeclaredTypeName, IntermediateRepresentation, ResolvedTypeReference, SingleUnionType,
    SingleUnionTypeProperties, TypeDeclaration, TypeReference, TypeShape,
};

use crate::GenerationError;

/// Type lookups: declarations by name, alias resolution, reachability.
#[derive(Debug, Clone)]
pub struct TypeResolver {
    ir: Arc<IntermediateRepresentation>,
    by_id: HashMap<String, usize>,
    /// Direct references of each declaration, by index. Unknown ids are dropped.
    edges: Vec<Vec<usize>>,
}

impl TypeResolver {
    pub fn new(ir: Arc<IntermediateRepresentation>) -> Self {
        let by_id: HashMap<_, _> = ir
            .types
            .iter()
            .enumerate()
            .map(|(index, declaration)| (declaration.name.type_id.clone(), index))
            .collect();
        let edges = ir
            .types
            .iter()
            .map(|declaration| {
                references(declaration)
                    .into_iter()
                    .filter_map(|name| by_id.get(&name.type_id).copied())
                    .collect()
            })
            .collect();
        Self { ir, by_id, edges }
    }

    /// Every declaration, in IR order.
    pub fn declarations(&self) -> &[TypeDeclaration] {
        &self.ir.types
    }

    /// Position of `name` among [`Self::declarations`].
    pub fn index_of(&self, name: &DeclaredTypeName) -> Option<usize> {
        self.by_id.get(&name.type_id).copied()
    }

    pub fn get_type_declaration(
        &self,
        name: &DeclaredTypeName,
    ) -> Result<&TypeDeclaration, GenerationError> {
        self.index_of(name)
            .map(|index| &self.ir.types[index])
            .ok_or_else(|| GenerationError::UnresolvedType {
                type_id: name.type_id.clone(),
            })
    }

    /// Follow `name` through any aliases to its concrete shape.
    pub fn resolve_type_name(
        &self,
        name: &DeclaredTypeName,
    ) -> Result<ResolvedTypeReference, GenerationError> {
        let mut seen = HashSet::new();
        let mut current = name;
        loop {
            if !seen.insert(current.type_id.as_str()) {
                return Err(GenerationError::AliasCycle {
                    type_id: name.type_id.clone(),
                });
            }
            let declaration = self.get_type_declaration(current)?;
            match &declaration.shape {
                TypeShape::Alias {
                    alias_of: TypeReference::Named(next),
                } => current = next,
                TypeShape::Alias { alias_of } => return Ok(resolve_unnamed(alias_of)),
                shape => {
                    return Ok(ResolvedTypeReference::Named {
                        name: current.clone(),
                        shape: shape
                            .shape_type()
                            .ok_or_else(|| GenerationError::UnresolvedType {
                                type_id: current.type_id.clone(),
                            })?,
                    });
                }
            }
        }
    }

    pub fn resolve_type_reference(
        &self,
        reference: &TypeReference,
    ) -> Result<ResolvedTypeReference, GenerationError> {
        match reference {
            TypeReference::Named(name) => self.resolve_type_name(name),
            other => Ok(resolve_unnamed(other)),
        }
    }

    /// Member of the union `name` whose discriminant is `wire_value`.
    pub fn union_member(
        &self,
        name: &DeclaredTypeName,
        wire_value: &str,
    ) -> Result<&SingleUnionType, GenerationError> {
        let resolved = match self.resolve_type_name(name)? {
            ResolvedTypeReference::Named { name, .. } => name,
            _ => {
                return Err(GenerationError::NotAUnion {
                    type_id: name.type_id.clone(),
                });
            }
        };
        let TypeShape::Union { types, .. } = &self.get_type_declaration(&resolved)?.shape else {
            return Err(GenerationError::NotAUnion {
                type_id: name.type_id.clone(),
            });
        };
        types
            .iter()
            .find(|member| member.discriminant_value.wire_value == wire_value)
            .ok_or_else(|| GenerationError::UnknownUnionMember {
                type_id: name.type_id.clone(),
                wire_value: wire_value.to_string(),
            })
    }

    /// Whether `from` can be reached again by following references out of `to`.
    ///
    /// A schema for `from` that refers to `to` must defer that reference
    /// when this holds.
    pub fn references_cycle(&self, from: &DeclaredTypeName, to: &DeclaredTypeName) -> bool {
        match (self.index_of(from), self.index_of(to)) {
            (Some(from), Some(to)) => self.reaches(to, from),
            _ => false,
        }
    }

    /// Whether a declaration refers back to itself, directly or indirectly.
    pub fn is_self_referential(&self, name: &DeclaredTypeName) -> bool {
        self.index_of(name).is_some_and(|index| {
            self.edges[index]
                .iter()
                .any(|&next| self.reaches(next, index))
        })
    }

    fn reaches(&self, start: usize, target: usize) -> bool {
        let mut visited = vec![false; self.edges.len()];
        let mut stack = vec![start];
        while let Some(index) = stack.pop() {
            if index == target {
                return true;
            }
            if std::mem::replace(&mut visited[index], true) {
                continue;
            }
            stack.extend(self.edges[index].iter().copied());
        }
        false
    }
}

fn resolve_unnamed(reference: &TypeReference) -> ResolvedTypeReference {
    match reference {
        TypeReference::Primitive { primitive } => ResolvedTypeReference::Primitive(*primitive),
        TypeReference::Container { container } => {
            ResolvedTypeReference::Container(container.clone())
        }
        TypeReference::Named(_) | TypeReference::Unknown => ResolvedTypeReference::Unknown,
    }
}

/// Every declared name a type declaration mentions, in visit order.
pub(crate) fn references(declaration: &TypeDeclaration) -> Vec<&DeclaredTypeName> {
    let mut out = Vec::new();
    match &declaration.shape {
        TypeShape::Alias { alias_of } => out.extend(alias_of.named_references()),
        TypeShape::Enum { .. } => {}
        TypeShape::Object {
            extends,
            properties,
        } => {
            out.extend(extends);
            for property in properties {
                out.extend(property.value_type.named_references());
            }
        }
        TypeShape::Union {
            extends,
            base_properties,
            types,
            ..
        } => {
            out.extend(extends);
            for property in base_properties {
                out.extend(property.value_type.named_references());
            }
            for member in types {
                match &member.shape {
                    SingleUnionTypeProperties::SamePropertiesAsObject(name) => out.push(name),
                    SingleUnionTypeProperties::SingleProperty(property) => {
                        out.extend(property.type_.named_references())
                    }
                    SingleUnionTypeProperties::NoProperties => {}
                }
            }
        }
        TypeShape::UndiscriminatedUnion { members } => {
            for member in members {
                out.extend(member.type_.named_references());
            }
        }
    }
    out
}
