//! Model assets: an ordered list of mesh/material subsets
//!
//! A model owns a reference on every mesh and material it points at, so a
//! model handle alone is enough to keep the whole tree alive.

use crate::assets::Assets;
use crate::error::AssetError;
use crate::loader::ModelLoader;
use crate::material::MaterialId;
use crate::mesh::MeshId;

slotmap::new_key_type! {
    /// Handle to a model in the asset registry
    pub struct ModelId;
}

/// One drawable piece of a model
#[derive(Clone, Copy, Debug)]
pub struct Subset {
    pub mesh: MeshId,
    pub material: MaterialId,
}

/// A model payload
#[derive(Clone, Debug, Default)]
pub struct Model {
    subsets: Vec<Subset>,
}

impl Model {
    /// The mesh/material subsets, in draw order
    pub fn subsets(&self) -> &[Subset] {
        &self.subsets
    }
}

impl Assets {
    /// Register a model with a single subset
    ///
    /// The model takes a reference on both the mesh and the material.
    pub fn model_create_mesh(
        &mut self,
        id: &str,
        mesh: MeshId,
        material: MaterialId,
    ) -> Result<ModelId, AssetError> {
        let model = self.models.create(
            id,
            Model {
                subsets: vec![Subset { mesh, material }],
            },
        )?;
        self.meshes.addref(mesh);
        self.materials.addref(material);
        Ok(model)
    }

    /// Load a model from a file through an external decoder
    ///
    /// The path doubles as the asset id. Each decoded mesh becomes a subset
    /// registered under `"{path}/mesh/{n}"`, all sharing `material`.
    ///
    /// On any failure (decode error, duplicate model or subset-mesh id)
    /// nothing stays registered: subset meshes created so far are released
    /// and the material references undone.
    pub fn model_create_file(
        &mut self,
        path: &str,
        loader: &dyn ModelLoader,
        material: MaterialId,
    ) -> Result<ModelId, AssetError> {
        let datas = loader.load(path.as_ref())?;

        let mut subsets: Vec<Subset> = Vec::with_capacity(datas.len());
        for (n, data) in datas.into_iter().enumerate() {
            let mesh = match self.mesh_create(&format!("{}/mesh/{}", path, n)) {
                Ok(mesh) => mesh,
                Err(err) => {
                    self.release_subsets(&subsets);
                    return Err(err);
                }
            };
            self.mesh_set_verts(mesh, &data.verts);
            self.mesh_set_inds(mesh, &data.inds);
            self.materials.addref(material);
            subsets.push(Subset { mesh, material });
        }

        let count = subsets.len();
        let model = match self.models.create(path, Model { subsets: subsets.clone() }) {
            Ok(model) => model,
            Err(err) => {
                self.release_subsets(&subsets);
                return Err(err);
            }
        };
        log::info!("loaded model '{}' ({} subsets)", path, count);
        Ok(model)
    }

    fn release_subsets(&mut self, subsets: &[Subset]) {
        for subset in subsets {
            self.mesh_release(subset.mesh);
            self.material_release(subset.material);
        }
    }

    /// Look up a model by id, taking a new reference on hit
    pub fn model_find(&mut self, id: &str) -> Option<ModelId> {
        self.models.find(id)
    }

    /// Drop one reference to a model
    ///
    /// When this frees the model, its references on every subset mesh and
    /// material are dropped, which can cascade further (a freed material
    /// drops its shader and textures).
    pub fn model_release(&mut self, model: ModelId) {
        if let Some(payload) = self.models.release(model) {
            for subset in payload.subsets {
                self.meshes.release(subset.mesh);
                self.material_release(subset.material);
            }
        }
    }

    /// Read access to a model payload
    pub fn model(&self, model: ModelId) -> Option<&Model> {
        self.models.get(model)
    }

    /// Current reference count of a model handle
    pub fn model_ref_count(&self, model: ModelId) -> Option<u32> {
        self.models.ref_count(model)
    }

    /// Number of subsets in a model
    pub fn model_subset_count(&self, model: ModelId) -> Option<usize> {
        self.models.get(model).map(|m| m.subsets.len())
    }

    /// The material of subset `index`
    pub fn model_get_material(&self, model: ModelId, index: usize) -> Option<MaterialId> {
        self.models
            .get(model)?
            .subsets
            .get(index)
            .map(|s| s.material)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::{MeshData, ModelLoader};
    use crate::mesh::Vertex;
    use spatialkit_math::{Vec2, Vec3};
    use std::path::Path;

    struct TriLoader {
        subsets: usize,
    }

    impl ModelLoader for TriLoader {
        fn load(&self, _path: &Path) -> Result<Vec<MeshData>, AssetError> {
            let tri = MeshData {
                verts: vec![
                    Vertex::new(Vec3::ZERO, Vec3::NEG_Z, Vec2::ZERO),
                    Vertex::new(Vec3::X, Vec3::NEG_Z, Vec2::X),
                    Vertex::new(Vec3::Y, Vec3::NEG_Z, Vec2::Y),
                ],
                inds: vec![0, 1, 2],
            };
            Ok((0..self.subsets)
                .map(|_| MeshData {
                    verts: tri.verts.clone(),
                    inds: tri.inds.clone(),
                })
                .collect())
        }
    }

    fn material_fixture(assets: &mut Assets) -> MaterialId {
        let shader = assets.shader_create("shader", "code").unwrap();
        let mat = assets.material_create("mat", shader).unwrap();
        assets.shader_release(shader);
        mat
    }

    #[test]
    fn test_create_mesh_refs_parts() {
        let mut assets = Assets::new();
        let material = material_fixture(&mut assets);
        let mesh = assets.mesh_create("tri").unwrap();

        let model = assets.model_create_mesh("model", mesh, material).unwrap();
        assert_eq!(assets.mesh_ref_count(mesh), Some(2));
        assert_eq!(assets.material_ref_count(material), Some(2));

        // Caller drops its own handles; the model keeps everything alive
        assets.mesh_release(mesh);
        assets.material_release(material);
        assert_eq!(assets.mesh_ref_count(mesh), Some(1));
        assert_eq!(assets.material_ref_count(material), Some(1));

        assets.model_release(model);
        assert!(assets.is_empty());
    }

    #[test]
    fn test_create_file_builds_subsets() {
        let mut assets = Assets::new();
        let material = material_fixture(&mut assets);

        let model = assets
            .model_create_file("scene.gltf", &TriLoader { subsets: 3 }, material)
            .unwrap();

        assert_eq!(assets.model_subset_count(model), Some(3));
        assert_eq!(assets.model_get_material(model, 1), Some(material));
        assert_eq!(assets.material_ref_count(material), Some(4));

        // Subset meshes are registered under derived ids
        let mesh = assets.mesh_find("scene.gltf/mesh/0").unwrap();
        assert_eq!(assets.mesh(mesh).unwrap().inds().len(), 3);
        assets.mesh_release(mesh);
    }

    #[test]
    fn test_release_cascades_through_material() {
        let mut assets = Assets::new();
        let material = material_fixture(&mut assets);
        let mesh = assets.mesh_create("tri").unwrap();
        let model = assets.model_create_mesh("model", mesh, material).unwrap();

        assets.mesh_release(mesh);
        assets.material_release(material);
        // Model is the only root left; releasing it frees mesh, material,
        // and the material's shader
        assets.model_release(model);
        assert!(assets.is_empty());
    }

    #[test]
    fn test_create_file_duplicate_model_id_rolls_back() {
        let mut assets = Assets::new();
        let material = material_fixture(&mut assets);
        let mesh = assets.mesh_create("tri").unwrap();
        assets.model_create_mesh("a.gltf", mesh, material).unwrap();
        let refs_before = assets.material_ref_count(material).unwrap();

        let result = assets.model_create_file("a.gltf", &TriLoader { subsets: 2 }, material);
        assert!(matches!(result, Err(AssetError::DuplicateId(_))));

        // The failed load leaves no meshes and no extra material references
        assert_eq!(assets.material_ref_count(material), Some(refs_before));
        assert!(assets.mesh_find("a.gltf/mesh/0").is_none());
        assert!(assets.mesh_find("a.gltf/mesh/1").is_none());
    }

    #[test]
    fn test_create_file_subset_mesh_collision_rolls_back() {
        let mut assets = Assets::new();
        let material = material_fixture(&mut assets);
        // Occupy the id the second subset would claim
        let blocker = assets.mesh_create("b.gltf/mesh/1").unwrap();
        let refs_before = assets.material_ref_count(material).unwrap();

        let result = assets.model_create_file("b.gltf", &TriLoader { subsets: 2 }, material);
        assert!(matches!(result, Err(AssetError::DuplicateId(_))));

        // Subset 0 was created before the collision and must be gone again
        assert!(assets.mesh_find("b.gltf/mesh/0").is_none());
        assert_eq!(assets.material_ref_count(material), Some(refs_before));
        assert!(assets.model_find("b.gltf").is_none());
        assert_eq!(assets.mesh_ref_count(blocker), Some(1));
    }

    #[test]
    fn test_get_material_out_of_range() {
        let mut assets = Assets::new();
        let material = material_fixture(&mut assets);
        let mesh = assets.mesh_create("tri").unwrap();
        let model = assets.model_create_mesh("model", mesh, material).unwrap();

        assert!(assets.model_get_material(model, 1).is_none());
    }
}
