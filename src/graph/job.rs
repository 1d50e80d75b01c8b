use std::fmt;

/// Index of a job within its [`JobGraph`] arena.
///
/// Jobs refer to each other by id, never by owning reference, so the
/// dependency/child back-references cannot form ownership cycles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct JobId(pub usize);

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A single command-line job with its dependencies.
///
/// Name and command are fixed at creation; dependency and child lists are
/// only extended while the graph is being built.
#[derive(Debug, Clone)]
pub struct Job {
    pub name: String,
    pub command: String,
    pub dependencies: Vec<JobId>,
    pub children: Vec<JobId>,
    pub submitted: bool,
}

impl Job {
    pub fn new(name: String, command: String) -> Self {
        Self {
            name,
            command,
            dependencies: Vec::new(),
            children: Vec::new(),
            submitted: false,
        }
    }

    pub fn is_root(&self) -> bool {
        self.dependencies.is_empty()
    }
}

/// Arena holding every job of one run.
///
/// Exclusively owned by the pipeline for the duration of the run and
/// discarded afterwards; nothing is persisted.
#[derive(Debug, Default)]
pub struct JobGraph {
    jobs: Vec<Job>,
}

impl JobGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a job and return its id.
    pub fn add_job(&mut self, name: impl Into<String>, command: impl Into<String>) -> JobId {
        let id = JobId(self.jobs.len());
        self.jobs.push(Job::new(name.into(), command.into()));
        id
    }

    /// Record that `job` must not run until `dependency` has finished,
    /// maintaining the reverse child edge.
    pub fn add_dependency(&mut self, job: JobId, dependency: JobId) {
        self.jobs[job.0].dependencies.push(dependency);
        self.jobs[dependency.0].children.push(job);
    }

    pub fn get(&self, id: JobId) -> &Job {
        &self.jobs[id.0]
    }

    pub fn mark_submitted(&mut self, id: JobId) {
        self.jobs[id.0].submitted = true;
    }

    pub fn ids(&self) -> impl Iterator<Item = JobId> {
        (0..self.jobs.len()).map(JobId)
    }

    pub fn jobs(&self) -> impl Iterator<Item = (JobId, &Job)> + '_ {
        self.jobs.iter().enumerate().map(|(i, j)| (JobId(i), j))
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }
}
