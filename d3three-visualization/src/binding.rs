//! Data binding between datasets and scene objects
//!
//! A [`Selection`] pairs scene objects with the data they were built from.
//! Binding new data joins by position: the first `min(old, new)` objects
//! are updated, surplus data enters as new objects and surplus objects
//! exit. Attributes are written by explicit setter closures, applied in
//! order to every entering and updated object.
//!
//! Bound objects may have been released behind the selection's back; the
//! join skips them on exit and recreates them on update.

use crate::renderer::{ObjectId, Renderer, SceneObject};
use d3three_core::{Error, Result};

/// Writes one attribute of a scene object from its datum
pub type Setter<D> = Box<dyn Fn(&mut SceneObject, &D)>;

/// Scene objects bound to data, in data order
#[derive(Debug, Clone)]
pub struct Selection<D> {
    nodes: Vec<ObjectId>,
    data: Vec<D>,
}

impl<D> Default for Selection<D> {
    fn default() -> Self {
        Self {
            nodes: Vec::new(),
            data: Vec::new(),
        }
    }
}

impl<D> Selection<D> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn ids(&self) -> &[ObjectId] {
        &self.nodes
    }

    pub fn datums(&self) -> &[D] {
        &self.data
    }

    pub fn iter(&self) -> impl Iterator<Item = (ObjectId, &D)> + '_ {
        self.nodes.iter().copied().zip(self.data.iter())
    }

    /// Join new data against the bound objects
    pub fn data(self, data: impl IntoIterator<Item = D>) -> DataJoin<D> {
        let mut enter: Vec<D> = data.into_iter().collect();
        let kept = self.nodes.len().min(enter.len());
        let updated_data: Vec<D> = enter.drain(..kept).collect();

        let mut nodes = self.nodes;
        let exit = nodes.split_off(kept);

        DataJoin {
            update: nodes.into_iter().zip(updated_data).collect(),
            enter,
            exit,
        }
    }

    /// Remove every bound object still present in the renderer
    pub fn remove<R: Renderer + ?Sized>(self, renderer: &mut R) -> Result<()> {
        for id in self.nodes {
            release(renderer, id)?;
        }
        Ok(())
    }
}

fn release<R: Renderer + ?Sized>(renderer: &mut R, id: ObjectId) -> Result<()> {
    if renderer.object(id).is_none() {
        log::debug!(target: "d3three", "bound object {id} was already released");
        return Ok(());
    }
    renderer.remove_from_scene(id)
}

/// The three parts of a data join
#[derive(Debug)]
pub struct DataJoin<D> {
    update: Vec<(ObjectId, D)>,
    enter: Vec<D>,
    exit: Vec<ObjectId>,
}

impl<D> DataJoin<D> {
    /// Existing objects paired with their new datum
    pub fn update(&self) -> &[(ObjectId, D)] {
        &self.update
    }

    /// Data without an object yet
    pub fn enter(&self) -> &[D] {
        &self.enter
    }

    /// Objects without a datum any more
    pub fn exit(&self) -> &[ObjectId] {
        &self.exit
    }

    /// Remove exiting objects, create entering ones with `append` and add
    /// them to the scene, then run `setters` over entering and updated
    /// objects.
    pub fn apply<R, F>(self, renderer: &mut R, mut append: F, setters: &[Setter<D>]) -> Result<Selection<D>>
    where
        R: Renderer + ?Sized,
        F: FnMut(&mut R, &D) -> ObjectId,
    {
        for id in self.exit {
            release(renderer, id)?;
        }

        let updated: Vec<(ObjectId, D)> = self
            .update
            .into_iter()
            .map(|(id, datum)| {
                if renderer.object(id).is_some() {
                    return (id, datum);
                }
                let replacement = append(renderer, &datum);
                log::debug!(target: "d3three", "bound object {id} was released, recreated as {replacement}");
                (replacement, datum)
            })
            .collect();

        let entered: Vec<(ObjectId, D)> = self
            .enter
            .into_iter()
            .map(|datum| (append(renderer, &datum), datum))
            .collect();

        let mut selection = Selection::new();
        for (id, datum) in updated.into_iter().chain(entered) {
            let object = renderer
                .object_mut(id)
                .ok_or_else(|| Error::Visualization(format!("bound object {id} no longer exists")))?;
            for setter in setters {
                setter(object, &datum);
            }
            renderer.add_to_scene(id)?;
            selection.nodes.push(id);
            selection.data.push(datum);
        }
        Ok(selection)
    }
}
