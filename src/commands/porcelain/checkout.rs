use crate::areas::refs::Head;
use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::branch::revision::Revision;
use crate::artifacts::checkout::migration::Migration;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::Result;

const DETACHMENT_NOTICE: &str = r#"
You are in 'detached HEAD' state. You can look around, make experimental
changes and commit them, and you can discard any commits you make in this
state without impacting any branches by performing another checkout.

If you want to create a new branch to retain commits you create, you may
do so (now or later) by using the branch command. Example:

    cairn branch <new-branch-name>
"#;

impl Repository {
    /// Move the working tree, index, and HEAD to `target`.
    ///
    /// A branch name attaches HEAD to that branch; any other revision
    /// detaches it. Refused with `UncommittedChanges` when the index differs
    /// from the HEAD tree, and with `UntrackedOverwritten` when an untracked
    /// file is in the way of the target tree.
    pub fn checkout(&self, target: &str) -> Result<()> {
        let current_head = self.refs().read_head()?;
        let current_oid = match self.refs().read_head_oid()? {
            Some(_) => Some(self.head_commit()?),
            None => None,
        };

        let revision = Revision::try_parse(target)?;
        let target_oid = revision.resolve(self)?;

        let database = self.database();
        let target_commit = database.parse_object_as_commit(&target_oid)?;
        let current_tree = match &current_oid {
            Some(oid) => Some(database.parse_object_as_commit(oid)?.tree_oid().clone()),
            None => None,
        };

        {
            let mut index = self.index();
            index.rehydrate()?;

            let migration = Migration::new(self, current_tree.as_ref(), target_commit.tree_oid())?;
            migration.check_index(&index)?;
            migration.check_untracked()?;
            migration.apply(&mut index)?;

            index.write_updates()?;
        }

        let new_head = match &revision {
            Revision::Ref(name) if name.is_head() => current_head.clone(),
            Revision::Ref(name) if self.refs().branch_exists(name) => {
                self.refs().set_head_symbolic(name)?;
                Head::Symbolic(name.clone())
            }
            _ => {
                self.refs().set_head_detached(&target_oid)?;
                Head::Detached(target_oid.clone())
            }
        };
        tracing::info!(target, commit = %target_oid, "checked out");

        self.print_previous_head(&current_head, current_oid.as_ref(), &target_oid)?;
        self.print_detachment_notice(&current_head, &new_head, target);
        self.print_new_head(&current_head, &new_head, &target_oid)?;

        Ok(())
    }

    /// `checkout -b`: create `branch_name` at the HEAD commit and attach
    /// HEAD to it. The working tree and index are unchanged.
    pub fn checkout_new_branch(&self, branch_name: &str) -> Result<()> {
        let branch_name = BranchName::try_parse(branch_name)?;
        let head_oid = self.head_commit()?;

        self.refs().create_branch(&branch_name, &head_oid)?;
        self.refs().set_head_symbolic(&branch_name)?;
        tracing::info!(branch = %branch_name, at = %head_oid, "created and switched branch");

        eprintln!("Switched to a new branch '{branch_name}'");

        Ok(())
    }

    fn print_previous_head(
        &self,
        current_head: &Head,
        current_oid: Option<&ObjectId>,
        target_oid: &ObjectId,
    ) -> Result<()> {
        if let (Head::Detached(_), Some(current_oid)) = (current_head, current_oid)
            && current_oid != target_oid
        {
            self.print_head_position("Previous HEAD position was", current_oid)?;
        }

        Ok(())
    }

    fn print_detachment_notice(&self, current_head: &Head, new_head: &Head, target: &str) {
        if matches!(current_head, Head::Symbolic(_)) && matches!(new_head, Head::Detached(_)) {
            eprintln!("Note: checking out '{target}'.\n{DETACHMENT_NOTICE}");
        }
    }

    fn print_new_head(
        &self,
        current_head: &Head,
        new_head: &Head,
        target_oid: &ObjectId,
    ) -> Result<()> {
        match new_head {
            Head::Detached(_) => self.print_head_position("HEAD is now at", target_oid)?,
            Head::Symbolic(branch) if new_head == current_head => {
                eprintln!("Already on '{branch}'")
            }
            Head::Symbolic(branch) => eprintln!("Switched to branch '{branch}'"),
        }

        Ok(())
    }

    fn print_head_position(&self, message: &str, oid: &ObjectId) -> Result<()> {
        let commit = self.database().parse_object_as_commit(oid)?;

        eprintln!("{message} {} {}", oid.to_short_oid(), commit.short_message());
        Ok(())
    }
}
