use rustc_hash::FxHashMap;

#[derive(Debug, Clone, Copy)]
struct Link {
    cw: usize,
    ccw: usize,
}

/// Rotation system over dense vertex indices.
///
/// Each half-edge `(v, w)` knows its clockwise and counterclockwise neighbors around `v`.
/// Faces are walked with [`PlanarEmbedding::next_face_half_edge`]: after arriving at `w` from
/// `v`, leave along the neighbor counterclockwise of `v`.
#[derive(Debug, Clone)]
pub(crate) struct PlanarEmbedding {
    links: FxHashMap<(usize, usize), Link>,
    first: Vec<Option<usize>>,
}

impl PlanarEmbedding {
    pub(crate) fn new(vertex_count: usize) -> Self {
        Self {
            links: FxHashMap::default(),
            first: vec![None; vertex_count],
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.first.len()
    }

    pub(crate) fn has_edge(&self, v: usize, w: usize) -> bool {
        self.links.contains_key(&(v, w))
    }

    pub(crate) fn cw(&self, v: usize, w: usize) -> usize {
        self.links[&(v, w)].cw
    }

    pub(crate) fn ccw(&self, v: usize, w: usize) -> usize {
        self.links[&(v, w)].ccw
    }

    fn set_cw(&mut self, v: usize, w: usize, cw: usize) {
        if let Some(link) = self.links.get_mut(&(v, w)) {
            link.cw = cw;
        }
    }

    fn set_ccw(&mut self, v: usize, w: usize, ccw: usize) {
        if let Some(link) = self.links.get_mut(&(v, w)) {
            link.ccw = ccw;
        }
    }

    fn add_lone_half_edge(&mut self, v: usize, w: usize) {
        self.links.insert((v, w), Link { cw: w, ccw: w });
        self.first[v] = Some(w);
    }

    /// Inserts `(v, w)` directly clockwise after `(v, reference)`.
    ///
    /// Without a reference the half-edge goes after the first neighbor of `v`, or becomes the
    /// only one.
    pub(crate) fn add_half_edge_cw(&mut self, v: usize, w: usize, reference: Option<usize>) {
        let Some(reference) = reference.or(self.first[v]) else {
            self.add_lone_half_edge(v, w);
            return;
        };
        let cw_reference = self.cw(v, reference);
        self.set_cw(v, reference, w);
        self.links.insert(
            (v, w),
            Link {
                cw: cw_reference,
                ccw: reference,
            },
        );
        self.set_ccw(v, cw_reference, w);
    }

    /// Inserts `(v, w)` directly counterclockwise before `(v, reference)`. If `reference` was the
    /// first neighbor of `v`, `w` takes its place.
    pub(crate) fn add_half_edge_ccw(&mut self, v: usize, w: usize, reference: Option<usize>) {
        let Some(reference) = reference.or(self.first[v]) else {
            self.add_lone_half_edge(v, w);
            return;
        };
        let ccw_reference = self.ccw(v, reference);
        self.set_ccw(v, reference, w);
        self.links.insert(
            (v, w),
            Link {
                cw: reference,
                ccw: ccw_reference,
            },
        );
        self.set_cw(v, ccw_reference, w);
        if self.first[v] == Some(reference) {
            self.first[v] = Some(w);
        }
    }

    pub(crate) fn add_half_edge_first(&mut self, v: usize, w: usize) {
        self.add_half_edge_ccw(v, w, self.first[v]);
    }

    /// Joins two vertices of different components. Only valid across components.
    pub(crate) fn connect_components(&mut self, v: usize, w: usize) {
        self.add_half_edge_first(v, w);
        self.add_half_edge_first(w, v);
    }

    /// Neighbors of `v` in clockwise order, starting at its first neighbor.
    pub(crate) fn neighbors_cw_order(&self, v: usize) -> Vec<usize> {
        let Some(start) = self.first[v] else {
            return Vec::new();
        };
        let mut out = vec![start];
        let mut cur = self.cw(v, start);
        while cur != start {
            out.push(cur);
            cur = self.cw(v, cur);
        }
        out
    }

    pub(crate) fn next_face_half_edge(&self, v: usize, w: usize) -> (usize, usize) {
        (w, self.ccw(w, v))
    }

    /// Vertices of the face that contains half-edge `(v, w)`, starting at `v`.
    #[cfg(test)]
    pub(crate) fn traverse_face(&self, v: usize, w: usize) -> Vec<usize> {
        let mut face = vec![v];
        let mut cur = self.next_face_half_edge(v, w);
        while cur != (v, w) {
            face.push(cur.0);
            cur = self.next_face_half_edge(cur.0, cur.1);
        }
        face
    }
}
